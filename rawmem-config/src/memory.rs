//! Allocator and buffer compare settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use rawmem_core::compare::CompareStrategy;

/// Process-wide allocator settings.
#[derive(Default, Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct AllocatorConfig {
    /// Attach an allocation statistics collector to the installed allocator.
    #[serde(default)]
    pub track_stats: bool,
}

/// Buffer compare settings.
#[derive(Default, Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct CompareConfig {
    /// Fixed strategy; runtime CPU detection when absent.
    #[serde(default)]
    pub strategy: Option<CompareStrategy>,
}
