use std::ops::Range;

use crate::models::DocPos;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Ranges of the new document whose content changed (empty for selection moves)
    pub changed: Vec<Range<DocPos>>,
    pub new_selection: Range<DocPos>,
    pub version: u64,
}
