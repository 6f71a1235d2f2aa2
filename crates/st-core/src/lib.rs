// ABOUTME: Shared types and configuration for splitterm.
// ABOUTME: Defines geometry, profiles, layout config and the surface/dispatcher contracts.

pub mod config;
pub mod dispatch;
pub mod geometry;
pub mod headless;
pub mod profile;
pub mod surface;

pub use config::{ConfigError, LayoutConfig};
pub use dispatch::{DispatchQueue, Dispatcher, ImmediateDispatcher, Job, QueueDispatcher};
pub use geometry::{Axis, Direction, PaneId, Rect, Size, SplitOrientation};
pub use headless::HeadlessSurface;
pub use profile::{CursorShape, ProfileId, TerminalSettings};
pub use surface::{SurfaceHandle, SurfaceNotice, SurfaceNotifier, TerminalSurface};
