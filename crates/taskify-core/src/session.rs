use tracing::{info, instrument};

use crate::error::{Error, ValidationError};
use crate::projection::{self, Buckets};
use crate::selection::{Selection, SelectionState};
use crate::store::TaskStore;
use crate::task::{Priority, Task};

#[derive(Debug, Default)]
pub struct Session {
    store: TaskStore,
    selection: SelectionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip(self, name))]
    pub fn add_task(&mut self, name: &str, priority: Priority) -> Result<usize, Error> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let index = self.store.add(Task::new(name, priority));
        self.selection.clear();
        info!(index, %priority, "task added");
        Ok(index)
    }

    #[instrument(skip(self, name))]
    pub fn update_task(&mut self, name: &str, priority: Priority) -> Result<usize, Error> {
        let selection = self.selection.current().ok_or(Error::NoSelection)?;
        self.store.update(selection.master_index, name, priority)?;
        self.selection.clear();
        info!(index = selection.master_index, %priority, "task updated");
        Ok(selection.master_index)
    }

    #[instrument(skip(self))]
    pub fn delete_task(&mut self) -> Result<Task, Error> {
        let selection = self.selection.current().ok_or(Error::NoSelection)?;
        let removed = self.store.remove(selection.master_index)?;
        self.selection.clear();
        info!(index = selection.master_index, remaining = self.store.len(), "task deleted");
        Ok(removed)
    }

    #[instrument(skip(self))]
    pub fn select(&mut self, bucket: Priority, local_index: usize) -> Option<&Task> {
        let selection = self.selection.select(&self.store, bucket, local_index)?;
        self.store.get(selection.master_index).ok()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection.current()
    }

    pub fn selection_coordinates(&self) -> Option<(Priority, usize)> {
        let selection = self.selection.current()?;
        projection::local_coordinates(&self.store, selection.master_index)
    }

    pub fn display_buckets(&self) -> Buckets {
        projection::display_buckets(&self.store)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }
}
