use thiserror::Error;

use crate::compare::CompareStrategy;

/// Allocation and array construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("Invalid length {0}: element count must be a non-negative integer")]
    InvalidLength(String),

    #[error("Allocation size overflow: {length} elements of {element_size} bytes")]
    SizeOverflow { length: usize, element_size: usize },

    #[error("Out of memory: failed to allocate {requested} bytes")]
    OutOfMemory { requested: usize },

    #[error("Process-wide allocator already installed or in use")]
    AlreadyInstalled,
}

/// Compare strategy selection failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("Compare strategy {0} is not supported on this CPU")]
    Unsupported(CompareStrategy),

    #[error("Compare strategy already selected: {0}")]
    AlreadySelected(CompareStrategy),
}

/// A compare strategy name that matches no known strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown compare strategy: {0}")]
pub struct UnknownStrategy(pub String);
