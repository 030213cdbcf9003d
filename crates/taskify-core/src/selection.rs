use tracing::debug;

use crate::projection;
use crate::store::TaskStore;
use crate::task::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub master_index: usize,
    pub bucket: Priority,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Option<Selection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    // Always re-resolves against the current store state; a previously
    // resolved master index is stale the moment the store mutates.
    pub fn select(
        &mut self,
        store: &TaskStore,
        bucket: Priority,
        local_index: usize,
    ) -> Option<Selection> {
        match projection::resolve_to_master_index(store, bucket, local_index) {
            Some(master_index) => {
                let selection = Selection {
                    master_index,
                    bucket,
                };
                debug!(master_index, %bucket, local_index, "selection stored");
                self.current = Some(selection);
                Some(selection)
            }
            None => {
                debug!(%bucket, local_index, "selection missed, state left empty");
                self.current = None;
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<Selection> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionState;
    use crate::store::TaskStore;
    use crate::task::{Priority, Task};

    fn store_with_two_high() -> TaskStore {
        let mut store = TaskStore::new();
        store.add(Task::new("a", Priority::High));
        store.add(Task::new("b", Priority::High));
        store
    }

    #[test]
    fn select_overwrites_previous_selection() {
        let store = store_with_two_high();
        let mut state = SelectionState::new();

        state.select(&store, Priority::High, 0);
        let second = state.select(&store, Priority::High, 1).expect("resolves");
        assert_eq!(state.current(), Some(second));
        assert_eq!(second.master_index, 1);
    }

    #[test]
    fn failed_select_leaves_state_empty() {
        let store = store_with_two_high();
        let mut state = SelectionState::new();

        state.select(&store, Priority::High, 0);
        assert!(state.select(&store, Priority::Low, 0).is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut state = SelectionState::new();
        state.clear();
        state.clear();
        assert!(state.is_empty());
    }
}
