//! Constructor selector

use nest_domain::planning::{ConstructorPlan, TypePlan};
use nest_domain::ports::Selector;

/// Offers every constructor, or only the injection-marked ones if any exist
#[derive(Debug, Default)]
pub struct StandardSelector;

impl Selector for StandardSelector {
    fn select_constructors<'a>(&self, plan: &'a TypePlan) -> Vec<&'a ConstructorPlan> {
        let constructors = plan.constructors();
        if constructors.iter().any(ConstructorPlan::is_inject) {
            constructors.iter().filter(|c| c.is_inject()).collect()
        } else {
            constructors.iter().collect()
        }
    }
}
