//! Write summaries returned by mutating operations.
//!
//! Update and delete endpoints report what the store did instead of
//! echoing the record back.

/// Outcome of an update by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateSummary {
    /// Records that matched the key (0 or 1)
    pub matched: u64,
    /// Records whose stored value actually changed
    pub modified: u64,
}

impl UpdateSummary {
    pub fn unmatched() -> Self {
        Self::default()
    }

    pub fn matched(modified: bool) -> Self {
        Self {
            matched: 1,
            modified: u64::from(modified),
        }
    }
}

/// Outcome of a delete by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteSummary {
    pub deleted: u64,
}
