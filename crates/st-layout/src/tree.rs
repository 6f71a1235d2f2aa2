// ABOUTME: Binary tree structure for terminal pane layout.
// ABOUTME: Supports splitting, closing, focus tracking and top-down bounds propagation.

use std::collections::HashMap;
use std::fmt;

use st_core::{LayoutConfig, PaneId, Rect, Size, SplitOrientation, SurfaceHandle};

use crate::error::LayoutError;

/// Structural notification queued by the tree for its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneEvent {
    /// The last leaf was closed; the tree is empty
    Closed,
    /// This leaf became the active leaf
    GotFocus(PaneId),
}

/// Parameters of a split
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRequest {
    pub orientation: SplitOrientation,
    /// Share of space kept by the existing pane; config default when `None`
    pub ratio: Option<f32>,
    /// Make the new pane the active one
    pub focus_new: bool,
}

impl SplitRequest {
    pub fn new(orientation: SplitOrientation) -> Self {
        Self {
            orientation,
            ratio: None,
            focus_new: false,
        }
    }

    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = Some(ratio);
        self
    }

    pub fn focusing_new(mut self, focus_new: bool) -> Self {
        self.focus_new = focus_new;
        self
    }
}

pub(crate) struct Leaf {
    pub(crate) surface: SurfaceHandle,
    pub(crate) active: bool,
    /// Focus clock value when this leaf last became active, 0 if never
    pub(crate) focus_stamp: u64,
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("title", &self.surface.title())
            .field("active", &self.active)
            .field("focus_stamp", &self.focus_stamp)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SplitNode {
    pub(crate) orientation: SplitOrientation,
    pub(crate) ratio: f32,
    pub(crate) first: PaneId,
    pub(crate) second: PaneId,
}

#[derive(Debug)]
pub(crate) enum Kind {
    Leaf(Leaf),
    Split(SplitNode),
}

#[derive(Debug)]
pub(crate) struct Node {
    /// Non-owning back-reference; `None` for the root
    pub(crate) parent: Option<PaneId>,
    pub(crate) bounds: Rect,
    pub(crate) kind: Kind,
}

impl Node {
    pub(crate) fn as_split(&self) -> Option<SplitNode> {
        match &self.kind {
            Kind::Split(split) => Some(*split),
            Kind::Leaf(_) => None,
        }
    }

    pub(crate) fn as_leaf(&self) -> Option<&Leaf> {
        match &self.kind {
            Kind::Leaf(leaf) => Some(leaf),
            Kind::Split(_) => None,
        }
    }
}

/// Split tree of the panes in one tab.
///
/// Nodes live in an arena keyed by `PaneId`; children are owned through the
/// arena and parents are plain ids. Every mutation queues `PaneEvent`s that
/// the owner drains with [`PaneTree::take_events`] before returning to its
/// caller.
#[derive(Debug)]
pub struct PaneTree {
    pub(crate) nodes: HashMap<PaneId, Node>,
    pub(crate) root: Option<PaneId>,
    pub(crate) config: LayoutConfig,
    focus_clock: u64,
    events: Vec<PaneEvent>,
}

impl PaneTree {
    /// Create a tree holding a single active leaf
    pub fn new(surface: SurfaceHandle, config: LayoutConfig) -> Self {
        let id = PaneId::next();
        let mut nodes = HashMap::new();
        nodes.insert(
            id,
            Node {
                parent: None,
                bounds: Rect::default(),
                kind: Kind::Leaf(Leaf {
                    surface,
                    active: true,
                    focus_stamp: 1,
                }),
            },
        );
        Self {
            nodes,
            root: Some(id),
            config: config.validated(),
            focus_clock: 1,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn root(&self) -> Option<PaneId> {
        self.root
    }

    /// True once the last leaf has been closed
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drain queued events in the order they were raised
    pub fn take_events(&mut self) -> Vec<PaneEvent> {
        std::mem::take(&mut self.events)
    }

    /// The leaf currently marked active, found by traversal
    pub fn active_leaf(&self) -> Option<PaneId> {
        self.leaves()
            .into_iter()
            .find(|id| self.leaf(*id).is_some_and(|leaf| leaf.active))
    }

    pub fn is_active(&self, id: PaneId) -> bool {
        self.leaf(id).is_some_and(|leaf| leaf.active)
    }

    pub fn is_leaf(&self, id: PaneId) -> bool {
        self.leaf(id).is_some()
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn bounds(&self, id: PaneId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.bounds)
    }

    pub fn parent(&self, id: PaneId) -> Option<PaneId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    pub fn surface(&self, id: PaneId) -> Option<&SurfaceHandle> {
        self.leaf(id).map(|leaf| &leaf.surface)
    }

    /// All leaves, first child before second child
    pub fn leaves(&self) -> Vec<PaneId> {
        match self.root {
            Some(root) => self.leaves_under(root),
            None => Vec::new(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|node| node.as_leaf().is_some())
            .count()
    }

    /// Visit every leaf with its surface, in traversal order
    pub fn for_each_leaf(&self, mut f: impl FnMut(PaneId, &SurfaceHandle)) {
        for id in self.leaves() {
            if let Some(leaf) = self.leaf(id) {
                f(id, &leaf.surface);
            }
        }
    }

    /// Smallest size the subtree rooted at `id` can be laid out in
    pub fn min_size(&self, id: PaneId) -> Size {
        let Some(node) = self.nodes.get(&id) else {
            return Size::default();
        };
        match node.as_split() {
            None => self.config.min_size(),
            Some(split) => {
                let first = self.min_size(split.first);
                let second = self.min_size(split.second);
                match split.orientation {
                    SplitOrientation::Vertical => Size::new(
                        first.width + second.width,
                        first.height.max(second.height),
                    ),
                    SplitOrientation::Horizontal => Size::new(
                        first.width.max(second.width),
                        first.height + second.height,
                    ),
                }
            }
        }
    }

    /// Whether `target` could be split without mutating anything
    pub fn can_split(
        &self,
        target: PaneId,
        orientation: SplitOrientation,
        ratio: Option<f32>,
    ) -> bool {
        self.check_split(target, orientation, ratio).is_ok()
    }

    /// Split a leaf, returns the id of the new leaf holding `surface`.
    ///
    /// The split node takes the leaf's place; the existing leaf keeps its id,
    /// surface and active flag and becomes the first child.
    pub fn split(
        &mut self,
        target: PaneId,
        request: SplitRequest,
        surface: SurfaceHandle,
    ) -> Result<PaneId, LayoutError> {
        let ratio = self
            .check_split(target, request.orientation, request.ratio)
            .inspect_err(|e| tracing::warn!("Cannot split {}: {}", target, e))?;
        let Some(node) = self.nodes.get_mut(&target) else {
            return Err(LayoutError::PaneNotFound(target));
        };

        let split_id = PaneId::next();
        let new_id = PaneId::next();
        let parent = node.parent;
        let bounds = node.bounds;
        node.parent = Some(split_id);

        self.nodes.insert(
            new_id,
            Node {
                parent: Some(split_id),
                bounds: Rect::default(),
                kind: Kind::Leaf(Leaf {
                    surface,
                    active: false,
                    focus_stamp: 0,
                }),
            },
        );
        self.nodes.insert(
            split_id,
            Node {
                parent,
                bounds,
                kind: Kind::Split(SplitNode {
                    orientation: request.orientation,
                    ratio,
                    first: target,
                    second: new_id,
                }),
            },
        );
        match parent {
            Some(parent) => self.replace_child(parent, target, split_id),
            None => self.root = Some(split_id),
        }

        self.layout(split_id, bounds);
        tracing::debug!(
            "Split {} {:?} at {:.2}, new pane {}",
            target,
            request.orientation,
            ratio,
            new_id
        );

        if request.focus_new {
            self.activate(new_id);
        }
        Ok(new_id)
    }

    /// Lay the whole tree out to fill `size`. Only the root can be resized
    /// directly; every descendant is recomputed from it.
    pub fn resize_content(&mut self, size: Size) {
        if let Some(root) = self.root {
            self.layout(root, Rect::from_size(size));
        }
    }

    /// External focus request (click, programmatic focus).
    /// Returns true if the active leaf changed.
    pub fn focus(&mut self, id: PaneId) -> Result<bool, LayoutError> {
        self.ensure_leaf(id)?;
        Ok(self.activate(id))
    }

    /// Clear every leaf, then mark `id` active. This is the only place the
    /// active flag is set.
    pub fn set_active(&mut self, id: PaneId) -> Result<(), LayoutError> {
        self.ensure_leaf(id)?;
        self.clear_active();
        self.focus_clock += 1;
        let stamp = self.focus_clock;
        if let Some(Node {
            kind: Kind::Leaf(leaf),
            ..
        }) = self.nodes.get_mut(&id)
        {
            leaf.active = true;
            leaf.focus_stamp = stamp;
        }
        Ok(())
    }

    pub fn clear_active(&mut self) {
        for node in self.nodes.values_mut() {
            if let Kind::Leaf(leaf) = &mut node.kind {
                leaf.active = false;
            }
        }
    }

    /// Close a leaf and release its surface.
    ///
    /// The sibling takes over the parent's place and space. Closing the last
    /// leaf empties the tree and queues `PaneEvent::Closed`.
    pub fn close(&mut self, id: PaneId) -> Result<(), LayoutError> {
        let node = self.nodes.get(&id).ok_or(LayoutError::PaneNotFound(id))?;
        let was_active = match &node.kind {
            Kind::Leaf(leaf) => leaf.active,
            Kind::Split(_) => return Err(LayoutError::NotALeaf(id)),
        };

        let Some(parent) = node.parent else {
            self.release(id);
            self.root = None;
            self.events.push(PaneEvent::Closed);
            tracing::info!("Closed last pane {}", id);
            return Ok(());
        };

        let parent_node = self
            .nodes
            .get(&parent)
            .ok_or(LayoutError::PaneNotFound(parent))?;
        let split = parent_node
            .as_split()
            .ok_or(LayoutError::NotALeaf(parent))?;
        let grandparent = parent_node.parent;
        let space = parent_node.bounds;
        let sibling = if split.first == id {
            split.second
        } else {
            split.first
        };

        self.release(id);
        self.nodes.remove(&parent);
        if let Some(node) = self.nodes.get_mut(&sibling) {
            node.parent = grandparent;
        }
        match grandparent {
            Some(grandparent) => self.replace_child(grandparent, parent, sibling),
            None => self.root = Some(sibling),
        }
        self.layout(sibling, space);

        if was_active {
            if let Some(heir) = self.heir_in(sibling) {
                self.activate(heir);
            }
        }
        tracing::debug!("Closed pane {}, remaining panes: {}", id, self.leaf_count());
        Ok(())
    }

    pub(crate) fn leaf(&self, id: PaneId) -> Option<&Leaf> {
        self.nodes.get(&id).and_then(Node::as_leaf)
    }

    pub(crate) fn split_node(&self, id: PaneId) -> Option<SplitNode> {
        self.nodes.get(&id).and_then(Node::as_split)
    }

    /// Make `id` active and queue `GotFocus`, unless it already is
    pub(crate) fn activate(&mut self, id: PaneId) -> bool {
        if self.is_active(id) || self.set_active(id).is_err() {
            return false;
        }
        self.events.push(PaneEvent::GotFocus(id));
        true
    }

    /// Leaves of the subtree at `id`, first child before second child
    pub(crate) fn leaves_under(&self, id: PaneId) -> Vec<PaneId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.nodes.get(&current).map(|node| &node.kind) {
                Some(Kind::Leaf(_)) => result.push(current),
                Some(Kind::Split(split)) => {
                    stack.push(split.second);
                    stack.push(split.first);
                }
                None => {}
            }
        }
        result
    }

    /// Assign `rect` to `id` and propagate down to every leaf's surface
    pub(crate) fn layout(&mut self, id: PaneId, rect: Rect) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        node.bounds = rect;
        match &node.kind {
            Kind::Leaf(leaf) => leaf.surface.set_bounds(rect),
            Kind::Split(split) => {
                let split = *split;
                let (first, second) = rect.split(split.orientation, split.ratio);
                self.layout(split.first, first);
                self.layout(split.second, second);
            }
        }
    }

    fn check_split(
        &self,
        target: PaneId,
        orientation: SplitOrientation,
        ratio: Option<f32>,
    ) -> Result<f32, LayoutError> {
        self.ensure_leaf(target)?;
        let ratio = ratio.unwrap_or(self.config.default_split_ratio);
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(LayoutError::InvalidRatio(ratio));
        }

        let axis = orientation.axis();
        let available = self.bounds(target).unwrap_or_default().extent(axis);
        let min = self.config.min_along(axis);
        let first = Rect::first_extent(available, ratio);
        let second = available - first;
        if first < min || second < min {
            let needed = (min / ratio).max(min / (1.0 - ratio));
            return Err(LayoutError::InsufficientSpace { needed, available });
        }
        Ok(ratio)
    }

    fn ensure_leaf(&self, id: PaneId) -> Result<(), LayoutError> {
        match self.nodes.get(&id).map(|node| &node.kind) {
            Some(Kind::Leaf(_)) => Ok(()),
            Some(Kind::Split(_)) => Err(LayoutError::NotALeaf(id)),
            None => Err(LayoutError::PaneNotFound(id)),
        }
    }

    fn replace_child(&mut self, parent: PaneId, old: PaneId, new: PaneId) {
        if let Some(Node {
            kind: Kind::Split(split),
            ..
        }) = self.nodes.get_mut(&parent)
        {
            if split.first == old {
                split.first = new;
            } else if split.second == old {
                split.second = new;
            }
        }
    }

    fn release(&mut self, id: PaneId) {
        if let Some(Node {
            kind: Kind::Leaf(leaf),
            ..
        }) = self.nodes.remove(&id)
        {
            leaf.surface.close();
        }
    }

    /// Leaf that inherits focus when the active leaf's sibling takes over:
    /// the most recently active leaf of the subtree, else its first leaf.
    fn heir_in(&self, subtree: PaneId) -> Option<PaneId> {
        let leaves = self.leaves_under(subtree);
        leaves
            .iter()
            .copied()
            .filter_map(|id| self.leaf(id).map(|leaf| (id, leaf.focus_stamp)))
            .filter(|(_, stamp)| *stamp > 0)
            .max_by_key(|(_, stamp)| *stamp)
            .map(|(id, _)| id)
            .or_else(|| leaves.first().copied())
    }
}
