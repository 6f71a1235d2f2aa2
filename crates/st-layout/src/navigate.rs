// ABOUTME: Directional operations on the pane tree.
// ABOUTME: Moves separators and focus relative to the active leaf.

use st_core::{Direction, PaneId, Rect};

use crate::tree::PaneTree;

/// Ratios never get closer to 0 or 1 than this, even with no minimum size
const RATIO_LIMIT: f32 = 0.01;

impl PaneTree {
    /// Move the separator of the nearest ancestor of the active leaf that is
    /// split across `direction`'s axis. `Right`/`Down` grow the first child.
    ///
    /// The ratio saturates so neither side shrinks below its minimum size;
    /// returns false when nothing moved.
    pub fn resize_pane(&mut self, direction: Direction) -> bool {
        let Some(active) = self.active_leaf() else {
            return false;
        };

        let mut child = active;
        while let Some(parent) = self.parent(child) {
            if self
                .split_node(parent)
                .is_some_and(|split| split.orientation == direction.orientation())
            {
                return self.nudge_separator(parent, direction);
            }
            child = parent;
        }
        false
    }

    /// Focus the leaf adjacent to the active leaf in `direction`.
    ///
    /// Returns false, without raising an event, when the active leaf already
    /// sits on the tree's edge in that direction.
    pub fn navigate_focus(&mut self, direction: Direction) -> bool {
        let Some(active) = self.active_leaf() else {
            return false;
        };

        let mut child = active;
        let neighbor = loop {
            let Some(parent) = self.parent(child) else {
                return false;
            };
            if let Some(split) = self.split_node(parent) {
                if split.orientation == direction.orientation() {
                    if direction.is_forward() && split.first == child {
                        break split.second;
                    }
                    if !direction.is_forward() && split.second == child {
                        break split.first;
                    }
                }
            }
            child = parent;
        };

        let origin = self.bounds(active).unwrap_or_default();
        let target = self.descend_toward(neighbor, direction, origin);
        tracing::debug!("Navigated {:?} from {} to {}", direction, active, target);
        self.activate(target)
    }

    fn nudge_separator(&mut self, id: PaneId, direction: Direction) -> bool {
        let (Some(split), Some(bounds)) = (self.split_node(id), self.bounds(id)) else {
            return false;
        };
        let axis = split.orientation.axis();
        let extent = bounds.extent(axis);
        if extent <= 0.0 {
            return false;
        }

        // Bounds on the first child's extent after layout rounds it.
        let lowest = self
            .min_size(split.first)
            .along(axis)
            .max(extent * RATIO_LIMIT)
            .ceil();
        let highest = (extent - self.min_size(split.second).along(axis))
            .min(extent * (1.0 - RATIO_LIMIT))
            .floor();
        if lowest > highest {
            return false;
        }

        let step = self.config.resize_step;
        let proposed = if direction.is_forward() {
            split.ratio + step
        } else {
            split.ratio - step
        };
        let first = Rect::first_extent(extent, proposed);
        let ratio = if first < lowest {
            lowest / extent
        } else if first > highest {
            highest / extent
        } else {
            proposed
        };
        let moved = if direction.is_forward() {
            ratio > split.ratio
        } else {
            ratio < split.ratio
        };
        if !moved {
            return false;
        }

        if let Some(crate::tree::Node {
            kind: crate::tree::Kind::Split(split),
            ..
        }) = self.nodes.get_mut(&id)
        {
            split.ratio = ratio;
        }
        self.layout(id, bounds);
        tracing::debug!("Resized {} {:?}, ratio now {:.2}", id, direction, ratio);
        true
    }

    /// Walk down from `id` to the leaf that borders the edge just crossed.
    /// Splits along the other axis pick the child lined up with `origin`.
    fn descend_toward(&self, id: PaneId, direction: Direction, origin: Rect) -> PaneId {
        let cross = direction.axis().cross();
        let position = origin.start(cross);
        let mut current = id;
        while let Some(split) = self.split_node(current) {
            current = if split.orientation == direction.orientation() {
                if direction.is_forward() {
                    split.first
                } else {
                    split.second
                }
            } else {
                let first = self.bounds(split.first).unwrap_or_default();
                if first.extent(cross) <= 0.0 || position < first.end(cross) {
                    split.first
                } else {
                    split.second
                }
            };
        }
        current
    }
}
