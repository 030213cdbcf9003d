use tracing::trace;

use crate::store::TaskStore;
use crate::task::{Priority, Task};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl Buckets {
    pub fn get(&self, level: Priority) -> &[String] {
        match level {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    fn get_mut(&mut self, level: Priority) -> &mut Vec<String> {
        match level {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        }
    }
}

pub fn bucket_for(store: &TaskStore, level: Priority) -> Vec<&Task> {
    store
        .tasks()
        .iter()
        .filter(|task| task.priority == level)
        .collect()
}

pub fn display_buckets(store: &TaskStore) -> Buckets {
    let mut buckets = Buckets::default();
    for task in store.tasks() {
        buckets.get_mut(task.priority).push(task.name.clone());
    }
    buckets
}

// Nothing here is cached: a resolved master index is only valid until the
// next mutation, so callers re-resolve on every selection event.
pub fn resolve_to_master_index(
    store: &TaskStore,
    level: Priority,
    local_index: usize,
) -> Option<usize> {
    let mut seen = 0;
    for (master_index, task) in store.tasks().iter().enumerate() {
        if task.priority != level {
            continue;
        }
        if seen == local_index {
            trace!(%level, local_index, master_index, "resolved bucket index");
            return Some(master_index);
        }
        seen += 1;
    }

    trace!(%level, local_index, bucket_len = seen, "bucket index out of range");
    None
}

pub fn local_coordinates(store: &TaskStore, master_index: usize) -> Option<(Priority, usize)> {
    let task = store.get(master_index).ok()?;
    let local_index = store.tasks()[..master_index]
        .iter()
        .filter(|earlier| earlier.priority == task.priority)
        .count();
    Some((task.priority, local_index))
}
