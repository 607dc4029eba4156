//! Registry of in-flight effect tasks, keyed by cancellation group

use feature_boundaries_core::effect::EffectId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::task::AbortHandle;

/// Tasks spawned under [`Effect::Cancellable`](feature_boundaries_core::Effect::Cancellable)
///
/// A task spawned inside nested cancellable effects is registered under every
/// enclosing group, so cancelling any of them aborts it.
#[derive(Default)]
pub(crate) struct CancellationRegistry {
    tasks: Mutex<HashMap<EffectId, Vec<AbortHandle>>>,
}

impl CancellationRegistry {
    /// Register a spawned task under each of `groups`
    pub(crate) fn register(&self, groups: &[EffectId], task: &AbortHandle) {
        if groups.is_empty() {
            return;
        }

        let mut tasks = self.lock();
        for group in groups {
            let handles = tasks.entry(group.clone()).or_default();
            handles.retain(|handle| !handle.is_finished());
            handles.push(task.clone());
        }
    }

    /// Abort and forget every task registered under `group` or a group
    /// derived from it with [`EffectId::child`]
    ///
    /// Returns how many tasks were still running.
    pub(crate) fn cancel(&self, group: &EffectId) -> usize {
        let handles: Vec<AbortHandle> = {
            let mut tasks = self.lock();
            let matching: Vec<EffectId> = tasks.keys().filter(|id| id.is_within(group)).cloned().collect();
            matching
                .iter()
                .filter_map(|id| tasks.remove(id))
                .flatten()
                .collect()
        };

        handles
            .into_iter()
            .filter(|handle| !handle.is_finished())
            .inspect(AbortHandle::abort)
            .count()
    }

    /// Number of unfinished tasks registered under `group`
    pub(crate) fn in_flight(&self, group: &EffectId) -> usize {
        self.lock()
            .get(group)
            .map_or(0, |handles| handles.iter().filter(|h| !h.is_finished()).count())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EffectId, Vec<AbortHandle>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
