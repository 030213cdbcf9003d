use tracing::debug;

use crate::error::{Error, IndexError, ValidationError};
use crate::task::{Priority, Task};

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) -> usize {
        let index = self.tasks.len();
        debug!(index, priority = %task.priority, "appending task");
        self.tasks.push(task);
        index
    }

    pub fn get(&self, index: usize) -> Result<&Task, IndexError> {
        self.check(index)?;
        Ok(&self.tasks[index])
    }

    pub fn update(&mut self, index: usize, name: &str, priority: Priority) -> Result<(), Error> {
        // every check runs before any mutation
        self.check(index)?;
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let task = &mut self.tasks[index];
        task.set_name(name);
        task.set_priority(priority);
        debug!(index, %priority, "updated task in place");
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Task, IndexError> {
        self.check(index)?;
        let removed = self.tasks.remove(index);
        debug!(index, remaining = self.tasks.len(), "removed task");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn check(&self, index: usize) -> Result<(), IndexError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(IndexError {
                index,
                len: self.tasks.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::error::{Error, IndexError};
    use crate::task::{Priority, Task};

    #[test]
    fn add_returns_consecutive_master_indices() {
        let mut store = TaskStore::new();
        assert_eq!(store.add(Task::new("a", Priority::High)), 0);
        assert_eq!(store.add(Task::new("b", Priority::Low)), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn get_and_remove_reject_out_of_range() {
        let mut store = TaskStore::new();
        store.add(Task::new("a", Priority::High));

        assert_eq!(store.get(1).unwrap_err(), IndexError { index: 1, len: 1 });
        assert_eq!(
            store.remove(7).unwrap_err(),
            IndexError { index: 7, len: 1 }
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_rejects_empty_name_without_mutating() {
        let mut store = TaskStore::new();
        store.add(Task::new("a", Priority::High));

        let err = store.update(0, "", Priority::Low).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.get(0).expect("in range").name, "a");
        assert_eq!(store.get(0).expect("in range").priority, Priority::High);
    }

    #[test]
    fn remove_shifts_subsequent_entries_down() {
        let mut store = TaskStore::new();
        store.add(Task::new("a", Priority::High));
        store.add(Task::new("b", Priority::Low));
        store.add(Task::new("c", Priority::High));

        let removed = store.remove(1).expect("in range");
        assert_eq!(removed.name, "b");
        assert_eq!(store.get(1).expect("in range").name, "c");
    }
}
