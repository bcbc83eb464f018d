//! Authoritative activation cache
//!
//! Holds the activation record of a whole scope tree. Every operation takes
//! one short lock; the lock is never held while calling out.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use nest_domain::ports::ActivationCache;
use nest_domain::value_objects::{Instance, InstanceId, InstanceWatch};
use parking_lot::Mutex;
use tracing::trace;

#[derive(Default)]
struct ActivationRecord {
    activated: HashMap<InstanceId, InstanceWatch>,
    deactivated: HashMap<InstanceId, InstanceWatch>,
}

/// Records which objects went through activation and deactivation
///
/// Records hold a weak liveness handle. A record whose object was dropped is
/// treated as absent, so an address reused by a new object never reads as
/// already activated.
#[derive(Default)]
pub struct StandardActivationCache {
    record: Mutex<ActivationRecord>,
}

impl StandardActivationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop records of objects that no longer exist, returning how many
    pub fn prune(&self) -> usize {
        let mut record = self.record.lock();
        let before = record.activated.len() + record.deactivated.len();
        record.activated.retain(|_, watch| watch.is_alive());
        record.deactivated.retain(|_, watch| watch.is_alive());
        let pruned = before - record.activated.len() - record.deactivated.len();
        trace!(pruned, "Pruned activation records");
        pruned
    }

    /// Number of live activated records
    pub fn activated_count(&self) -> usize {
        self.record
            .lock()
            .activated
            .values()
            .filter(|watch| watch.is_alive())
            .count()
    }

    /// Number of live deactivated records
    pub fn deactivated_count(&self) -> usize {
        self.record
            .lock()
            .deactivated
            .values()
            .filter(|watch| watch.is_alive())
            .count()
    }
}

fn insert(set: &mut HashMap<InstanceId, InstanceWatch>, instance: &Instance) -> bool {
    match set.entry(instance.id()) {
        Entry::Occupied(mut entry) => {
            if entry.get().is_alive() {
                false
            } else {
                entry.insert(instance.watch());
                true
            }
        }
        Entry::Vacant(entry) => {
            entry.insert(instance.watch());
            true
        }
    }
}

fn contains(set: &HashMap<InstanceId, InstanceWatch>, instance: &Instance) -> bool {
    set.get(&instance.id()).is_some_and(InstanceWatch::is_alive)
}

impl ActivationCache for StandardActivationCache {
    fn clear(&self) {
        let mut record = self.record.lock();
        record.activated.clear();
        record.deactivated.clear();
    }

    fn add_activated_instance(&self, instance: &Instance) -> bool {
        insert(&mut self.record.lock().activated, instance)
    }

    fn add_deactivated_instance(&self, instance: &Instance) -> bool {
        insert(&mut self.record.lock().deactivated, instance)
    }

    fn is_activated(&self, instance: &Instance) -> bool {
        contains(&self.record.lock().activated, instance)
    }

    fn is_deactivated(&self, instance: &Instance) -> bool {
        contains(&self.record.lock().deactivated, instance)
    }

    fn authority(self: Arc<Self>) -> Arc<dyn ActivationCache> {
        self
    }

    fn dispose(&self) {
        self.clear();
    }
}
