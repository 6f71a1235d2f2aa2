// ABOUTME: In-memory terminal surface with no rendering or PTY behind it.
// ABOUTME: Records every call so hosts and tests can inspect what the tab did.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::geometry::Rect;
use crate::profile::{ProfileId, TerminalSettings};
use crate::surface::{SurfaceNotifier, TerminalSurface};

#[derive(Debug, Default)]
struct State {
    title: String,
    scroll_offset: i32,
    bounds: Option<Rect>,
    settings: Option<TerminalSettings>,
    focus_requests: usize,
    closed: bool,
    notifier: Option<SurfaceNotifier>,
}

/// Surface that keeps its state in memory
#[derive(Debug)]
pub struct HeadlessSurface {
    profile: ProfileId,
    state: Mutex<State>,
}

impl HeadlessSurface {
    pub fn new(profile: ProfileId, title: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            profile,
            state: Mutex::new(State {
                title: title.into(),
                ..State::default()
            }),
        })
    }

    /// Change the title and tell the tab about it, as a shell would via OSC
    pub fn set_title(&self, title: impl Into<String>) {
        let notifier = {
            let mut state = self.state.lock();
            state.title = title.into();
            state.notifier.clone()
        };
        if let Some(notifier) = notifier {
            notifier.title_changed();
        }
    }

    /// Simulate the user clicking into this surface
    pub fn click(&self) {
        if let Some(notifier) = self.notifier() {
            notifier.focus_gained();
        }
    }

    /// Simulate the shell exiting
    pub fn exit(&self) {
        if let Some(notifier) = self.notifier() {
            notifier.exited();
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.state.lock().bounds
    }

    pub fn settings(&self) -> Option<TerminalSettings> {
        self.state.lock().settings.clone()
    }

    pub fn focus_requests(&self) -> usize {
        self.state.lock().focus_requests
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    fn notifier(&self) -> Option<SurfaceNotifier> {
        self.state.lock().notifier.clone()
    }
}

impl TerminalSurface for HeadlessSurface {
    fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    fn focus(&self) {
        self.state.lock().focus_requests += 1;
    }

    fn scroll_offset(&self) -> i32 {
        self.state.lock().scroll_offset
    }

    fn set_scroll_offset(&self, offset: i32) {
        self.state.lock().scroll_offset = offset.max(0);
    }

    fn set_bounds(&self, bounds: Rect) {
        self.state.lock().bounds = Some(bounds);
    }

    fn profile_id(&self) -> ProfileId {
        self.profile
    }

    fn update_settings(&self, settings: &TerminalSettings) {
        self.state.lock().settings = Some(settings.clone());
    }

    fn attach_notifier(&self, notifier: SurfaceNotifier) {
        self.state.lock().notifier = Some(notifier);
    }

    fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.notifier = None;
    }
}
