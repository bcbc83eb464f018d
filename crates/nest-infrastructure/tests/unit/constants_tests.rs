//! Constants Tests

use nest_infrastructure::constants::*;

#[test]
fn test_config_constants() {
    assert_eq!(DEFAULT_CONFIG_FILENAME, "nest.toml");
    assert_eq!(CONFIG_ENV_PREFIX, "NEST");
    assert_eq!(CONFIG_ENV_SEPARATOR, "__");
    assert!(LOG_FILTER_ENV.starts_with(CONFIG_ENV_PREFIX));
}

#[test]
fn test_component_names_are_distinct() {
    let mut names = vec![
        STANDARD_ACTIVATION_CACHE,
        CHILD_ACTIVATION_CACHE,
        STANDARD_CONSTRUCTOR_SCORER,
        CHILD_CONSTRUCTOR_SCORER,
        STANDARD_SELECTOR,
        DEFAULT_VALUE_BINDING_RESOLVER,
        SELF_BINDING_RESOLVER,
        ACTIVATION_CACHE_STRATEGY,
        INITIALIZABLE_STRATEGY,
        BINDING_ACTION_STRATEGY,
    ];
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}
