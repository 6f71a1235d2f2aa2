// ABOUTME: A tab holding one tree of terminal panes.
// ABOUTME: Tracks the active pane, mirrors its title and forwards work to its surface.

use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use st_core::{
    Direction, Dispatcher, LayoutConfig, PaneId, ProfileId, Size, SplitOrientation,
    SurfaceHandle, SurfaceNotice, SurfaceNotifier, TerminalSettings,
};
use st_layout::{LayoutError, PaneEvent, PaneTree, SplitRequest};

use crate::events::{Observers, SubscriptionId, TabEvent, TabProperty};

/// One tab: a pane tree plus the state mirrored out of its active pane.
///
/// All methods are expected to run on the UI thread. Tree events are handled
/// before each method returns, so observers see a consistent tab.
pub struct Tab {
    tree: PaneTree,
    /// Cached active leaf, updated only through `set_active`
    active: Option<PaneId>,
    focused: bool,
    closed: bool,
    title: String,
    icon_path: String,
    observers: Observers,
    dispatcher: Arc<dyn Dispatcher>,
    notice_sender: UnboundedSender<SurfaceNotice>,
    notices: UnboundedReceiver<SurfaceNotice>,
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("tree", &self.tree)
            .field("active", &self.active)
            .field("focused", &self.focused)
            .field("closed", &self.closed)
            .field("title", &self.title)
            .field("icon_path", &self.icon_path)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

/// Scrolls one pane's surface through the tab's dispatcher. `Send`, so
/// scroll requests can come from any thread.
#[derive(Clone)]
pub struct ScrollHandle {
    surface: SurfaceHandle,
    dispatcher: Arc<dyn Dispatcher>,
}

impl ScrollHandle {
    pub fn scroll(&self, delta: i32) {
        let surface = Arc::clone(&self.surface);
        self.dispatcher.dispatch(Box::new(move || {
            let offset = surface.scroll_offset();
            surface.set_scroll_offset(offset.saturating_add(delta));
        }));
    }
}

impl Tab {
    /// Create a tab whose only pane wraps `surface`
    pub fn new(
        surface: SurfaceHandle,
        dispatcher: Arc<dyn Dispatcher>,
        config: LayoutConfig,
    ) -> Self {
        let (notice_sender, notices) = unbounded_channel();
        let tree = PaneTree::new(Arc::clone(&surface), config);
        let active = tree.root();
        if let Some(id) = active {
            surface.attach_notifier(SurfaceNotifier::new(id, notice_sender.clone()));
        }

        Self {
            title: surface.title(),
            tree,
            active,
            focused: false,
            closed: false,
            icon_path: String::new(),
            observers: Observers::default(),
            dispatcher,
            notice_sender,
            notices,
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&TabEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn tree(&self) -> &PaneTree {
        &self.tree
    }

    pub fn active_pane(&self) -> Option<PaneId> {
        self.active
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon_path(&self) -> &str {
        &self.icon_path
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// True once the last pane has closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Surface of the active pane. `None` only after the tab closed.
    pub fn active_terminal_control(&self) -> Option<SurfaceHandle> {
        self.active_surface().cloned()
    }

    /// Profile the active pane's surface was created from
    pub fn focused_profile(&self) -> Option<ProfileId> {
        self.active_surface().map(|surface| surface.profile_id())
    }

    /// Title of the active pane, empty if there is none
    pub fn active_title(&self) -> String {
        self.active_surface()
            .map(|surface| surface.title())
            .unwrap_or_default()
    }

    /// Update our focus state. Gaining focus hands input focus to the
    /// active pane's surface.
    pub fn set_focused(&mut self, focused: bool) {
        self.process_surface_notices();
        self.focused = focused;
        if focused {
            if let Some(surface) = self.active_surface() {
                surface.focus();
            }
        }
    }

    pub fn can_split_pane(&self, orientation: SplitOrientation) -> bool {
        self.active
            .is_some_and(|id| self.tree.can_split(id, orientation, None))
    }

    /// Split the active pane, placing `surface` in the new pane.
    /// Focus moves to the new pane only if the layout config asks for it.
    pub fn split_pane(
        &mut self,
        orientation: SplitOrientation,
        surface: SurfaceHandle,
        ratio: Option<f32>,
    ) -> Result<PaneId, LayoutError> {
        let mut request =
            SplitRequest::new(orientation).focusing_new(self.tree.config().focus_new_pane);
        request.ratio = ratio;
        self.split_pane_with(request, surface)
    }

    pub fn split_pane_with(
        &mut self,
        request: SplitRequest,
        surface: SurfaceHandle,
    ) -> Result<PaneId, LayoutError> {
        self.process_surface_notices();
        let target = self.active.ok_or(LayoutError::NoActiveLeaf)?;

        let id = self.tree.split(target, request, Arc::clone(&surface))?;
        surface.attach_notifier(SurfaceNotifier::new(id, self.notice_sender.clone()));
        tracing::info!(
            "Split {} {:?}, new pane {}, total panes: {}",
            target,
            request.orientation,
            id,
            self.tree.leaf_count()
        );

        self.pump_tree_events();
        Ok(id)
    }

    /// Fill a new content size. Always applied from the root so the whole
    /// tree is laid out again.
    pub fn resize_content(&mut self, size: Size) {
        self.process_surface_notices();
        self.tree.resize_content(size);
    }

    /// Move the separator next to the active pane. Saturates silently.
    pub fn resize_pane(&mut self, direction: Direction) -> bool {
        self.process_surface_notices();
        let moved = self.tree.resize_pane(direction);
        self.pump_tree_events();
        moved
    }

    /// Move focus to the pane across the separator in `direction`
    pub fn navigate_focus(&mut self, direction: Direction) -> bool {
        self.process_surface_notices();
        let moved = self.tree.navigate_focus(direction);
        self.pump_tree_events();
        moved
    }

    /// Make a specific pane active, as when the user clicks into it
    pub fn focus_pane(&mut self, id: PaneId) -> Result<bool, LayoutError> {
        self.process_surface_notices();
        let changed = self.tree.focus(id)?;
        self.pump_tree_events();
        Ok(changed)
    }

    /// Close the active pane. Closing the last pane raises `TabEvent::Closed`.
    pub fn close_pane(&mut self) -> Result<(), LayoutError> {
        self.process_surface_notices();
        let id = self.active.ok_or(LayoutError::NoActiveLeaf)?;
        self.close_leaf(id)
    }

    pub fn close_pane_by_id(&mut self, id: PaneId) -> Result<(), LayoutError> {
        self.process_surface_notices();
        self.close_leaf(id)
    }

    fn close_leaf(&mut self, id: PaneId) -> Result<(), LayoutError> {
        self.tree.close(id)?;
        tracing::info!("Closed {}, remaining panes: {}", id, self.tree.leaf_count());
        self.pump_tree_events();
        Ok(())
    }

    /// Move the active pane's viewport by `delta` lines. The surface is
    /// touched on the UI context through the dispatcher.
    pub fn scroll(&self, delta: i32) {
        match self.scroll_handle() {
            Some(handle) => handle.scroll(delta),
            None => tracing::debug!("Scroll with no active pane"),
        }
    }

    /// Handle for scrolling the current active pane from another thread.
    /// It keeps targeting that pane even after focus moves on.
    pub fn scroll_handle(&self) -> Option<ScrollHandle> {
        Some(ScrollHandle {
            surface: Arc::clone(self.active_surface()?),
            dispatcher: Arc::clone(&self.dispatcher),
        })
    }

    /// Apply `settings` to every pane created from `profile`
    pub fn update_settings(&mut self, settings: &TerminalSettings, profile: ProfileId) {
        self.process_surface_notices();
        let mut updated = 0;
        self.tree.for_each_leaf(|_, surface| {
            if surface.profile_id() == profile {
                surface.update_settings(settings);
                updated += 1;
            }
        });
        tracing::debug!("Updated settings for profile {} on {} panes", profile, updated);
    }

    pub fn update_icon(&mut self, icon_path: impl Into<String>) {
        self.process_surface_notices();
        let icon_path = icon_path.into();
        // Don't reload our icon if it hasn't changed.
        if icon_path == self.icon_path {
            return;
        }
        self.icon_path = icon_path;
        self.observers
            .emit(TabEvent::PropertyChanged(TabProperty::IconPath));
    }

    /// Handle every notice surfaces have sent since the last call.
    /// Returns how many were handled.
    pub fn process_surface_notices(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(notice) = self.notices.try_recv() {
            handled += 1;
            match notice {
                SurfaceNotice::TitleChanged(id) => {
                    if self.active == Some(id) {
                        self.refresh_title();
                    }
                }
                SurfaceNotice::FocusGained(id) => {
                    if self.tree.is_leaf(id) && self.tree.focus(id).is_ok() {
                        self.pump_tree_events();
                    }
                }
                SurfaceNotice::Exited(id) => {
                    if self.tree.is_leaf(id) {
                        tracing::info!("Shell in {} exited", id);
                        if let Err(e) = self.close_leaf(id) {
                            tracing::warn!("Failed to close {}: {}", id, e);
                        }
                    }
                }
            }
        }
        handled
    }

    fn active_surface(&self) -> Option<&SurfaceHandle> {
        self.active.and_then(|id| self.tree.surface(id))
    }

    fn pump_tree_events(&mut self) {
        for event in self.tree.take_events() {
            match event {
                PaneEvent::GotFocus(sender) => {
                    if self.active != Some(sender) {
                        self.set_active(sender);
                    }
                }
                PaneEvent::Closed => self.on_tree_closed(),
            }
        }
    }

    /// The single place the active pane changes: clear the whole tree, mark
    /// `id`, refresh the cache and title, then tell observers.
    fn set_active(&mut self, id: PaneId) {
        if let Err(e) = self.tree.set_active(id) {
            tracing::warn!("Cannot activate {}: {}", id, e);
            return;
        }
        self.active = Some(id);
        if self.focused {
            if let Some(surface) = self.active_surface() {
                surface.focus();
            }
        }
        tracing::debug!("Active pane is now {}", id);

        self.refresh_title();
        self.observers.emit(TabEvent::ActivePaneChanged);
    }

    fn on_tree_closed(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.active = None;
        tracing::info!("All panes closed, tab closing");
        self.observers.emit(TabEvent::Closed);
    }

    fn refresh_title(&mut self) {
        let title = self.active_title();
        if title != self.title {
            self.title = title;
            self.observers
                .emit(TabEvent::PropertyChanged(TabProperty::Title));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_core::{HeadlessSurface, ImmediateDispatcher, QueueDispatcher, Rect, TerminalSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tab_with(surface: Arc<HeadlessSurface>) -> Tab {
        let mut tab = Tab::new(surface, Arc::new(ImmediateDispatcher), LayoutConfig::default());
        tab.resize_content(Size::new(100.0, 50.0));
        tab
    }

    fn record(tab: &mut Tab) -> Rc<RefCell<Vec<TabEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        tab.subscribe(move |event| sink.borrow_mut().push(*event));
        log
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn new_tab_mirrors_its_only_pane() {
        let surface = HeadlessSurface::new(ProfileId::new(), "pwsh");
        let tab = tab_with(surface.clone());

        let root = tab.tree().root().unwrap();
        assert_eq!(tab.active_pane(), Some(root));
        assert_eq!(tab.title(), "pwsh");
        assert_eq!(tab.active_title(), "pwsh");
        assert_eq!(tab.focused_profile(), Some(surface.profile_id()));
        assert!(!tab.is_focused());
        assert_eq!(surface.bounds(), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn split_resize_close_scenario() {
        let l0_surface = HeadlessSurface::new(ProfileId::new(), "l0");
        let mut tab = tab_with(l0_surface);
        let events = record(&mut tab);
        let l0 = tab.active_pane().unwrap();

        let l1 = tab
            .split_pane(
                SplitOrientation::Vertical,
                HeadlessSurface::new(ProfileId::new(), "l1"),
                Some(0.5),
            )
            .unwrap();
        assert_eq!(tab.tree().bounds(l0), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(tab.tree().bounds(l1), Some(Rect::new(50.0, 0.0, 50.0, 50.0)));
        assert_eq!(tab.active_pane(), Some(l0));

        assert!(tab.resize_pane(Direction::Right));
        let root = tab.tree().root().unwrap();
        match tab.tree().node(root).unwrap().kind {
            st_layout::PaneKind::Split { ratio, .. } => assert!(approx(ratio, 0.55)),
            other => panic!("expected split, got {:?}", other),
        }
        assert!(tab.tree().bounds(l0).unwrap().width < 50.0 + 10.0);
        assert!(tab.tree().bounds(l0).unwrap().width > 50.0);
        assert!(tab.tree().bounds(l1).unwrap().width < 50.0);

        tab.close_pane().unwrap();
        assert_eq!(tab.tree().leaves(), vec![l1]);
        assert_eq!(tab.tree().bounds(l1), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert_eq!(tab.active_pane(), Some(l1));
        assert_eq!(tab.title(), "l1");
        assert!(!events.borrow().contains(&TabEvent::Closed));

        tab.close_pane().unwrap();
        assert!(tab.is_closed());
        assert_eq!(tab.active_pane(), None);
        assert_eq!(events.borrow().last(), Some(&TabEvent::Closed));
        assert_eq!(tab.close_pane(), Err(LayoutError::NoActiveLeaf));
        assert_eq!(
            events
                .borrow()
                .iter()
                .filter(|event| **event == TabEvent::Closed)
                .count(),
            1
        );
    }

    #[test]
    fn active_change_updates_title_and_notifies() {
        let mut tab = tab_with(HeadlessSurface::new(ProfileId::new(), "bash"));
        let events = record(&mut tab);
        tab.split_pane(
            SplitOrientation::Horizontal,
            HeadlessSurface::new(ProfileId::new(), "htop"),
            None,
        )
        .unwrap();
        assert!(events.borrow().is_empty());

        assert!(tab.navigate_focus(Direction::Down));

        assert_eq!(tab.title(), "htop");
        assert_eq!(
            *events.borrow(),
            vec![
                TabEvent::PropertyChanged(TabProperty::Title),
                TabEvent::ActivePaneChanged
            ]
        );
    }

    #[test]
    fn navigate_at_edge_fires_nothing() {
        let mut tab = tab_with(HeadlessSurface::new(ProfileId::new(), "bash"));
        tab.split_pane(
            SplitOrientation::Vertical,
            HeadlessSurface::new(ProfileId::new(), "vim"),
            None,
        )
        .unwrap();
        let events = record(&mut tab);
        let active = tab.active_pane();

        assert!(!tab.navigate_focus(Direction::Left));
        assert_eq!(tab.active_pane(), active);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn split_focuses_new_pane_when_configured() {
        let config = LayoutConfig {
            focus_new_pane: true,
            ..LayoutConfig::default()
        };
        let mut tab = Tab::new(
            HeadlessSurface::new(ProfileId::new(), "bash"),
            Arc::new(ImmediateDispatcher),
            config,
        );
        tab.resize_content(Size::new(100.0, 50.0));

        let new_pane = tab
            .split_pane(
                SplitOrientation::Vertical,
                HeadlessSurface::new(ProfileId::new(), "new"),
                None,
            )
            .unwrap();

        assert_eq!(tab.active_pane(), Some(new_pane));
        assert!(tab.tree().is_active(new_pane));
        assert_eq!(tab.title(), "new");
    }

    #[test]
    fn split_without_space_reports_and_keeps_tree() {
        let mut tab = Tab::new(
            HeadlessSurface::new(ProfileId::new(), "bash"),
            Arc::new(ImmediateDispatcher),
            LayoutConfig::default(),
        );
        tab.resize_content(Size::new(20.0, 50.0));

        assert!(!tab.can_split_pane(SplitOrientation::Vertical));
        assert!(tab.can_split_pane(SplitOrientation::Horizontal));
        let err = tab
            .split_pane(
                SplitOrientation::Vertical,
                HeadlessSurface::new(ProfileId::new(), "x"),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, LayoutError::InsufficientSpace { .. }));
        assert_eq!(tab.tree().leaf_count(), 1);
    }

    #[test]
    fn update_settings_only_touches_matching_profile() {
        let p1 = ProfileId::new();
        let p2 = ProfileId::new();
        let first = HeadlessSurface::new(p1, "one");
        let second = HeadlessSurface::new(p2, "two");
        let mut tab = tab_with(first.clone());
        tab.split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();

        let settings = TerminalSettings {
            font_size: 16.0,
            ..TerminalSettings::default()
        };
        tab.update_settings(&settings, p1);

        assert_eq!(first.settings(), Some(settings));
        assert_eq!(second.settings(), None);
    }

    #[test]
    fn update_settings_reaches_inactive_panes() {
        let profile = ProfileId::new();
        let first = HeadlessSurface::new(profile, "one");
        let second = HeadlessSurface::new(profile, "two");
        let mut tab = tab_with(first.clone());
        tab.split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();

        tab.update_settings(&TerminalSettings::default(), profile);

        assert!(first.settings().is_some());
        assert!(second.settings().is_some());
    }

    #[test]
    fn scroll_goes_through_dispatcher_to_active_pane_only() {
        let (dispatcher, mut queue) = QueueDispatcher::new();
        let first = HeadlessSurface::new(ProfileId::new(), "one");
        let second = HeadlessSurface::new(ProfileId::new(), "two");
        let mut tab = Tab::new(first.clone(), Arc::new(dispatcher), LayoutConfig::default());
        tab.resize_content(Size::new(100.0, 50.0));
        tab.split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();

        tab.scroll(3);
        tab.scroll(2);
        assert_eq!(first.scroll_offset(), 0);

        assert_eq!(queue.run_pending(), 2);
        assert_eq!(first.scroll_offset(), 5);
        assert_eq!(second.scroll_offset(), 0);
    }

    #[test]
    fn scroll_handle_can_be_used_from_another_thread() {
        let (dispatcher, mut queue) = QueueDispatcher::new();
        let surface = HeadlessSurface::new(ProfileId::new(), "less");
        let tab = Tab::new(surface.clone(), Arc::new(dispatcher), LayoutConfig::default());
        let handle = tab.scroll_handle().unwrap();

        std::thread::spawn(move || handle.scroll(4)).join().unwrap();
        assert_eq!(surface.scroll_offset(), 0);

        assert_eq!(queue.run_pending(), 1);
        assert_eq!(surface.scroll_offset(), 4);
    }

    #[test]
    fn set_focused_handles_pending_click_first() {
        let first = HeadlessSurface::new(ProfileId::new(), "one");
        let second = HeadlessSurface::new(ProfileId::new(), "two");
        let mut tab = tab_with(first.clone());
        tab.split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();

        second.click();
        tab.set_focused(true);

        assert_eq!(tab.title(), "two");
        assert_eq!(first.focus_requests(), 0);
        assert_eq!(second.focus_requests(), 1);
    }

    #[test]
    fn close_by_id_sees_pending_exit() {
        let second = HeadlessSurface::new(ProfileId::new(), "two");
        let mut tab = tab_with(HeadlessSurface::new(ProfileId::new(), "one"));
        let id = tab
            .split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();

        second.exit();

        assert_eq!(tab.close_pane_by_id(id), Err(LayoutError::PaneNotFound(id)));
        assert_eq!(tab.tree().leaf_count(), 1);
        assert!(!tab.is_closed());
    }

    #[test]
    fn update_icon_handles_pending_title_first() {
        let surface = HeadlessSurface::new(ProfileId::new(), "bash");
        let mut tab = tab_with(surface.clone());
        let events = record(&mut tab);

        surface.set_title("top");
        tab.update_icon("icons/top.png");

        assert_eq!(
            *events.borrow(),
            vec![
                TabEvent::PropertyChanged(TabProperty::Title),
                TabEvent::PropertyChanged(TabProperty::IconPath)
            ]
        );
    }

    #[test]
    fn set_focused_focuses_active_surface() {
        let surface = HeadlessSurface::new(ProfileId::new(), "bash");
        let mut tab = tab_with(surface.clone());

        tab.set_focused(false);
        assert_eq!(surface.focus_requests(), 0);

        tab.set_focused(true);
        assert!(tab.is_focused());
        assert_eq!(surface.focus_requests(), 1);
    }

    #[test]
    fn navigating_focused_tab_moves_input_focus() {
        let second = HeadlessSurface::new(ProfileId::new(), "two");
        let mut tab = tab_with(HeadlessSurface::new(ProfileId::new(), "one"));
        tab.split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();
        tab.set_focused(true);

        tab.navigate_focus(Direction::Right);

        assert_eq!(second.focus_requests(), 1);
    }

    #[test]
    fn update_icon_only_notifies_on_change() {
        let mut tab = tab_with(HeadlessSurface::new(ProfileId::new(), "bash"));
        let events = record(&mut tab);

        tab.update_icon("ms-appx:///ProfileIcons/bash.png");
        tab.update_icon("ms-appx:///ProfileIcons/bash.png");

        assert_eq!(tab.icon_path(), "ms-appx:///ProfileIcons/bash.png");
        assert_eq!(
            *events.borrow(),
            vec![TabEvent::PropertyChanged(TabProperty::IconPath)]
        );
    }

    #[test]
    fn title_change_on_active_surface_is_mirrored() {
        let first = HeadlessSurface::new(ProfileId::new(), "one");
        let second = HeadlessSurface::new(ProfileId::new(), "two");
        let mut tab = tab_with(first.clone());
        tab.split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();
        let events = record(&mut tab);

        second.set_title("ignored");
        first.set_title("renamed");
        assert_eq!(tab.process_surface_notices(), 2);

        assert_eq!(tab.title(), "renamed");
        assert_eq!(
            *events.borrow(),
            vec![TabEvent::PropertyChanged(TabProperty::Title)]
        );
    }

    #[test]
    fn click_in_surface_activates_its_pane() {
        let second = HeadlessSurface::new(ProfileId::new(), "two");
        let mut tab = tab_with(HeadlessSurface::new(ProfileId::new(), "one"));
        let second_id = tab
            .split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();
        let events = record(&mut tab);

        second.click();
        tab.process_surface_notices();

        assert_eq!(tab.active_pane(), Some(second_id));
        assert!(events.borrow().contains(&TabEvent::ActivePaneChanged));
    }

    #[test]
    fn exited_surface_closes_its_pane() {
        let first = HeadlessSurface::new(ProfileId::new(), "one");
        let second = HeadlessSurface::new(ProfileId::new(), "two");
        let mut tab = tab_with(first.clone());
        tab.split_pane(SplitOrientation::Vertical, second.clone(), None)
            .unwrap();

        second.exit();
        tab.process_surface_notices();
        assert_eq!(tab.tree().leaf_count(), 1);
        assert!(second.is_closed());
        assert!(!tab.is_closed());

        let events = record(&mut tab);
        first.exit();
        tab.process_surface_notices();
        assert!(tab.is_closed());
        assert_eq!(*events.borrow(), vec![TabEvent::Closed]);
    }

    #[test]
    fn focus_pane_rejects_unknown_pane() {
        let mut tab = tab_with(HeadlessSurface::new(ProfileId::new(), "one"));
        let bogus = PaneId::next();
        assert_eq!(tab.focus_pane(bogus), Err(LayoutError::PaneNotFound(bogus)));
    }

    #[test]
    fn active_pane_is_always_the_single_active_leaf() {
        let mut tab = tab_with(HeadlessSurface::new(ProfileId::new(), "a"));
        tab.resize_content(Size::new(400.0, 200.0));
        let check = |tab: &Tab| {
            let tree = tab.tree();
            let active: Vec<_> = tree
                .leaves()
                .into_iter()
                .filter(|id| tree.is_active(*id))
                .collect();
            assert_eq!(active.len(), 1);
            assert_eq!(tab.active_pane(), Some(active[0]));
        };

        for (orientation, title) in [
            (SplitOrientation::Vertical, "b"),
            (SplitOrientation::Horizontal, "c"),
            (SplitOrientation::Vertical, "d"),
        ] {
            tab.split_pane(orientation, HeadlessSurface::new(ProfileId::new(), title), None)
                .unwrap();
            check(&tab);
            tab.navigate_focus(Direction::Right);
            check(&tab);
            tab.navigate_focus(Direction::Down);
            check(&tab);
        }
        while tab.tree().leaf_count() > 1 {
            tab.close_pane().unwrap();
            check(&tab);
        }
    }
}
