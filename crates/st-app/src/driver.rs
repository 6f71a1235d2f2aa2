// ABOUTME: Runs line commands against one tab of headless panes.
// ABOUTME: Owns the tab, its dispatch queue and the surfaces it created.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use st_core::{
    DispatchQueue, HeadlessSurface, LayoutConfig, PaneId, ProfileId, QueueDispatcher, Size,
    TerminalSettings,
};
use st_layout::LayoutSnapshot;
use st_tab::{Tab, TabEvent};

use crate::command::Command;

/// Content size before the first `resize` command
pub const INITIAL_SIZE: Size = Size::new(1200.0, 800.0);

const DEFAULT_PROFILE: &str = "default";

pub struct Driver {
    tab: Tab,
    queue: DispatchQueue,
    profiles: HashMap<String, ProfileId>,
    surfaces: HashMap<PaneId, Arc<HeadlessSurface>>,
    shells_started: usize,
}

impl Driver {
    pub fn new(config: LayoutConfig) -> Self {
        let (dispatcher, queue) = QueueDispatcher::new();
        let mut profiles = HashMap::new();
        let profile = *profiles
            .entry(DEFAULT_PROFILE.to_string())
            .or_insert_with(ProfileId::new);
        let surface = HeadlessSurface::new(profile, "shell 1");

        let mut tab = Tab::new(surface.clone(), Arc::new(dispatcher), config);
        tab.subscribe(|event| match event {
            TabEvent::Closed => tracing::info!("All panes closed"),
            TabEvent::ActivePaneChanged => tracing::info!("Active pane changed"),
            TabEvent::PropertyChanged(property) => {
                tracing::info!("Tab property {} changed", property)
            }
        });
        tab.set_focused(true);
        tab.resize_content(INITIAL_SIZE);

        let mut surfaces = HashMap::new();
        if let Some(id) = tab.active_pane() {
            surfaces.insert(id, surface);
        }

        Self {
            tab,
            queue,
            profiles,
            surfaces,
            shells_started: 1,
        }
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    pub fn is_finished(&self) -> bool {
        self.tab.is_closed()
    }

    pub fn snapshot(&self) -> Option<LayoutSnapshot> {
        self.tab.tree().snapshot()
    }

    /// Run one command. Returns a snapshot when the command asks for one.
    pub fn execute(&mut self, command: Command) -> Result<Option<LayoutSnapshot>> {
        if self.is_finished() {
            bail!("tab is closed");
        }

        match command {
            Command::Split {
                orientation,
                ratio,
                profile,
            } => {
                let profile = self.profile(profile.as_deref().unwrap_or(DEFAULT_PROFILE));
                self.shells_started += 1;
                let surface =
                    HeadlessSurface::new(profile, format!("shell {}", self.shells_started));
                let id = self
                    .tab
                    .split_pane(orientation, surface.clone(), ratio)
                    .context("split failed")?;
                self.surfaces.insert(id, surface);
            }
            Command::Resize(size) => self.tab.resize_content(size),
            Command::Grow(direction) => {
                if !self.tab.resize_pane(direction) {
                    tracing::debug!("Nothing to resize {:?}", direction);
                }
            }
            Command::Focus(direction) => {
                if !self.tab.navigate_focus(direction) {
                    tracing::debug!("No pane {:?} of the active one", direction);
                }
            }
            Command::Close => self.tab.close_pane().context("close failed")?,
            Command::Exit => {
                self.active_surface()?.exit();
                self.tab.process_surface_notices();
            }
            Command::Scroll(lines) => {
                self.tab.scroll(lines);
                self.queue.run_pending();
            }
            Command::Title(title) => {
                self.active_surface()?.set_title(title);
                self.tab.process_surface_notices();
            }
            Command::Icon(path) => self.tab.update_icon(path),
            Command::Settings { profile, font_size } => {
                let Some(profile) = self.profiles.get(&profile).copied() else {
                    bail!("no pane uses profile '{}'", profile);
                };
                let settings = TerminalSettings {
                    font_size,
                    ..TerminalSettings::default()
                };
                self.tab.update_settings(&settings, profile);
            }
            Command::Show => return Ok(self.snapshot()),
        }

        self.forget_closed_surfaces();
        Ok(None)
    }

    fn profile(&mut self, name: &str) -> ProfileId {
        *self
            .profiles
            .entry(name.to_string())
            .or_insert_with(ProfileId::new)
    }

    fn active_surface(&self) -> Result<Arc<HeadlessSurface>> {
        self.tab
            .active_pane()
            .and_then(|id| self.surfaces.get(&id))
            .cloned()
            .context("no active pane")
    }

    fn forget_closed_surfaces(&mut self) {
        self.surfaces.retain(|_, surface| !surface.is_closed());
    }
}
