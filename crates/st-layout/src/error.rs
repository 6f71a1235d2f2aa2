// ABOUTME: Errors returned by pane tree operations.
// ABOUTME: Rejected operations leave the tree untouched.

use st_core::PaneId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// One of the two panes a split would create falls below the minimum size
    #[error("Not enough space to split: need {needed} but only {available} available")]
    InsufficientSpace { needed: f32, available: f32 },

    #[error("No active pane in tree")]
    NoActiveLeaf,

    #[error("{0} not found")]
    PaneNotFound(PaneId),

    #[error("{0} is a split, not a leaf")]
    NotALeaf(PaneId),

    #[error("Invalid split ratio {0}, must be strictly between 0 and 1")]
    InvalidRatio(f32),
}
