// ABOUTME: Read-only views of the pane tree.
// ABOUTME: Per-node views for hosts and a serializable nested snapshot of the layout.

use serde::{Deserialize, Serialize};
use st_core::{PaneId, ProfileId, Rect, SplitOrientation};

use crate::tree::{Kind, PaneTree};

/// What a node is, without access to its surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaneKind {
    Leaf {
        active: bool,
    },
    Split {
        orientation: SplitOrientation,
        ratio: f32,
        first: PaneId,
        second: PaneId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneView {
    pub id: PaneId,
    pub parent: Option<PaneId>,
    pub bounds: Rect,
    pub kind: PaneKind,
}

/// Nested copy of the tree, suitable for JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutSnapshot {
    Leaf {
        id: PaneId,
        bounds: Rect,
        active: bool,
        title: String,
        profile: ProfileId,
    },
    Split {
        id: PaneId,
        bounds: Rect,
        orientation: SplitOrientation,
        ratio: f32,
        first: Box<LayoutSnapshot>,
        second: Box<LayoutSnapshot>,
    },
}

impl LayoutSnapshot {
    pub fn id(&self) -> PaneId {
        match self {
            LayoutSnapshot::Leaf { id, .. } | LayoutSnapshot::Split { id, .. } => *id,
        }
    }

    /// Number of leaves in this snapshot
    pub fn leaf_count(&self) -> usize {
        match self {
            LayoutSnapshot::Leaf { .. } => 1,
            LayoutSnapshot::Split { first, second, .. } => {
                first.leaf_count() + second.leaf_count()
            }
        }
    }
}

impl PaneTree {
    pub fn node(&self, id: PaneId) -> Option<PaneView> {
        let node = self.nodes.get(&id)?;
        let kind = match &node.kind {
            Kind::Leaf(leaf) => PaneKind::Leaf {
                active: leaf.active,
            },
            Kind::Split(split) => PaneKind::Split {
                orientation: split.orientation,
                ratio: split.ratio,
                first: split.first,
                second: split.second,
            },
        };
        Some(PaneView {
            id,
            parent: node.parent,
            bounds: node.bounds,
            kind,
        })
    }

    /// Snapshot of the whole tree, `None` once it is empty
    pub fn snapshot(&self) -> Option<LayoutSnapshot> {
        self.root.and_then(|root| self.snapshot_of(root))
    }

    fn snapshot_of(&self, id: PaneId) -> Option<LayoutSnapshot> {
        let node = self.nodes.get(&id)?;
        let snapshot = match &node.kind {
            Kind::Leaf(leaf) => LayoutSnapshot::Leaf {
                id,
                bounds: node.bounds,
                active: leaf.active,
                title: leaf.surface.title(),
                profile: leaf.surface.profile_id(),
            },
            Kind::Split(split) => LayoutSnapshot::Split {
                id,
                bounds: node.bounds,
                orientation: split.orientation,
                ratio: split.ratio,
                first: Box::new(self.snapshot_of(split.first)?),
                second: Box::new(self.snapshot_of(split.second)?),
            },
        };
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::tests::{surface, tree_with_size};
    use crate::tree::SplitRequest;

    #[test]
    fn snapshot_mirrors_tree() {
        let (mut tree, left) = tree_with_size(100.0, 50.0);
        let right = tree
            .split(left, SplitRequest::new(SplitOrientation::Vertical), surface("vim"))
            .unwrap();

        let snapshot = tree.snapshot().unwrap();
        assert_eq!(snapshot.leaf_count(), 2);
        match snapshot {
            LayoutSnapshot::Split {
                orientation,
                first,
                second,
                ..
            } => {
                assert_eq!(orientation, SplitOrientation::Vertical);
                assert_eq!(first.id(), left);
                assert_eq!(second.id(), right);
                assert!(matches!(*second, LayoutSnapshot::Leaf { ref title, active: false, .. } if title == "vim"));
            }
            LayoutSnapshot::Leaf { .. } => panic!("expected split at root"),
        }
    }

    #[test]
    fn snapshot_serializes_tagged() {
        let (tree, _) = tree_with_size(10.0, 10.0);
        let json = serde_json::to_value(tree.snapshot().unwrap()).unwrap();
        assert_eq!(json["type"], "leaf");
        assert_eq!(json["active"], true);
        assert_eq!(json["bounds"]["width"], 10.0);
    }

    #[test]
    fn node_view_reports_structure() {
        let (mut tree, left) = tree_with_size(100.0, 50.0);
        let right = tree
            .split(left, SplitRequest::new(SplitOrientation::Vertical), surface("r"))
            .unwrap();
        let root = tree.root().unwrap();

        let view = tree.node(root).unwrap();
        assert_eq!(view.parent, None);
        assert_eq!(
            view.kind,
            PaneKind::Split {
                orientation: SplitOrientation::Vertical,
                ratio: 0.5,
                first: left,
                second: right,
            }
        );
        assert_eq!(
            tree.node(right).unwrap().kind,
            PaneKind::Leaf { active: false }
        );
    }
}
