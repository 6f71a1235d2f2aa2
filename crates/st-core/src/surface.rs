// ABOUTME: Contract between the pane tree and the terminal surfaces it holds.
// ABOUTME: Surfaces report title, focus and exit back to their tab through a notifier.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::geometry::{PaneId, Rect};
use crate::profile::{ProfileId, TerminalSettings};

/// Shared handle to a terminal surface. The owning leaf is the only long-lived
/// holder; clones are taken transiently to marshal work onto the UI context.
pub type SurfaceHandle = Arc<dyn TerminalSurface>;

/// Rendering/input endpoint of one terminal session.
///
/// Methods take `&self`; implementations synchronise their own state since
/// calls may arrive through a dispatcher from another thread.
pub trait TerminalSurface: Send + Sync {
    fn title(&self) -> String;

    /// Request input focus. One-way; the caller does not wait.
    fn focus(&self);

    fn scroll_offset(&self) -> i32;

    fn set_scroll_offset(&self, offset: i32);

    /// New content rectangle after a layout pass
    fn set_bounds(&self, bounds: Rect);

    fn profile_id(&self) -> ProfileId;

    fn update_settings(&self, settings: &TerminalSettings);

    /// Called once when the surface is placed into a tab
    fn attach_notifier(&self, notifier: SurfaceNotifier);

    /// Called when the pane holding this surface is closed
    fn close(&self) {}
}

/// Message from a surface to the tab that holds it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceNotice {
    TitleChanged(PaneId),
    FocusGained(PaneId),
    Exited(PaneId),
}

/// Sending half handed to each surface. Cheap to clone, usable from any thread.
#[derive(Debug, Clone)]
pub struct SurfaceNotifier {
    pane: PaneId,
    sender: UnboundedSender<SurfaceNotice>,
}

impl SurfaceNotifier {
    pub fn new(pane: PaneId, sender: UnboundedSender<SurfaceNotice>) -> Self {
        Self { pane, sender }
    }

    pub fn title_changed(&self) {
        self.send(SurfaceNotice::TitleChanged(self.pane));
    }

    pub fn focus_gained(&self) {
        self.send(SurfaceNotice::FocusGained(self.pane));
    }

    /// The session behind the surface ended; its pane should close
    pub fn exited(&self) {
        self.send(SurfaceNotice::Exited(self.pane));
    }

    fn send(&self, notice: SurfaceNotice) {
        // The tab may already be gone; nothing left to notify then.
        let _ = self.sender.send(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn notifier_tags_notices_with_its_pane() {
        let (tx, mut rx) = unbounded_channel();
        let pane = PaneId::next();
        let notifier = SurfaceNotifier::new(pane, tx);

        notifier.title_changed();
        notifier.exited();

        assert_eq!(rx.try_recv().unwrap(), SurfaceNotice::TitleChanged(pane));
        assert_eq!(rx.try_recv().unwrap(), SurfaceNotice::Exited(pane));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn notifier_survives_dropped_receiver() {
        let (tx, rx) = unbounded_channel();
        drop(rx);
        SurfaceNotifier::new(PaneId::next(), tx).focus_gained();
    }
}
