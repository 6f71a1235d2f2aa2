// ABOUTME: Geometry primitives shared by the pane tree and its surfaces.
// ABOUTME: Rectangles, sizes, split orientations and navigation directions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a pane node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(u64);

impl PaneId {
    /// Allocate a fresh id. Ids are never reused within a process.
    pub fn next() -> Self {
        Self(NEXT_PANE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

/// Size of the content area a tab has to fill
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length along the given axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Content rectangle of a pane, in the host's units (usually pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `size`
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Length along the given axis
    pub fn extent(&self, axis: Axis) -> f32 {
        self.size().along(axis)
    }

    /// Start coordinate along the given axis
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn end(&self, axis: Axis) -> f32 {
        self.start(axis) + self.extent(axis)
    }

    /// Extent the first child gets when `extent` is split at `ratio`
    pub fn first_extent(extent: f32, ratio: f32) -> f32 {
        (extent * ratio).round()
    }

    /// Divide into (first, second) children for a split with the given ratio.
    /// The first child's extent is rounded to a whole unit; the second child
    /// takes the rest.
    pub fn split(&self, orientation: SplitOrientation, ratio: f32) -> (Rect, Rect) {
        match orientation {
            SplitOrientation::Vertical => {
                let first_width = Rect::first_extent(self.width, ratio);
                (
                    Rect::new(self.x, self.y, first_width, self.height),
                    Rect::new(
                        self.x + first_width,
                        self.y,
                        self.width - first_width,
                        self.height,
                    ),
                )
            }
            SplitOrientation::Horizontal => {
                let first_height = Rect::first_extent(self.height, ratio);
                (
                    Rect::new(self.x, self.y, self.width, first_height),
                    Rect::new(
                        self.x,
                        self.y + first_height,
                        self.width,
                        self.height - first_height,
                    ),
                )
            }
        }
    }

    /// True if the two rectangles share interior area
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Axis of a layout dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// How a pane is divided.
///
/// `Vertical` draws a vertical separator: children sit side by side
/// (first = left, second = right). `Horizontal` draws a horizontal
/// separator: children are stacked (first = top, second = bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitOrientation {
    Horizontal,
    Vertical,
}

impl SplitOrientation {
    /// Axis along which the two children are laid out
    pub fn axis(self) -> Axis {
        match self {
            SplitOrientation::Vertical => Axis::X,
            SplitOrientation::Horizontal => Axis::Y,
        }
    }
}

/// Direction for pane resizing and focus navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
        }
    }

    /// The split orientation whose separator this direction moves across
    pub fn orientation(self) -> SplitOrientation {
        match self.axis() {
            Axis::X => SplitOrientation::Vertical,
            Axis::Y => SplitOrientation::Horizontal,
        }
    }

    /// Right and Down point away from the origin
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}
