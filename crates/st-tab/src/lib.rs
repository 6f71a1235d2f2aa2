// ABOUTME: Tab management for splitterm.
// ABOUTME: A tab owns one pane tree, mirrors its active pane and republishes its events.

mod events;
mod tab;

pub use events::{SubscriptionId, TabEvent, TabProperty};
pub use tab::{ScrollHandle, Tab};
