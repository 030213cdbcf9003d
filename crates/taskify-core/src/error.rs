use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task name must not be empty")]
    EmptyName,

    #[error("a priority level is required")]
    MissingPriority,

    #[error("unrecognized priority: {0}")]
    UnknownPriority(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("task index {index} out of range for {len} task(s)")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no task selected")]
    NoSelection,

    #[error(transparent)]
    Index(#[from] IndexError),
}

impl Error {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid task",
            Self::NoSelection => "No selection",
            Self::Index(_) => "Internal error",
        }
    }

    // Index errors mean orchestration handed the store a stale index;
    // they propagate instead of being shown inline.
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}
