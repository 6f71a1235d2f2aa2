// ABOUTME: Pane layout management for a terminal tab.
// ABOUTME: Binary split tree with bounds propagation, focus tracking and close collapse.

mod error;
mod navigate;
mod snapshot;
mod tree;

pub use error::LayoutError;
pub use snapshot::{LayoutSnapshot, PaneKind, PaneView};
pub use st_core::{Direction, PaneId, Rect, Size, SplitOrientation};
pub use tree::{PaneEvent, PaneTree, SplitRequest};
