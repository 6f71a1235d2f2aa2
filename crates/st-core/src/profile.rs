// ABOUTME: Terminal profile identity and the settings pushed to surfaces.
// ABOUTME: Settings are matched to panes by the profile their surface was created under.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of the profile a terminal surface was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

impl FromStr for ProfileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start_matches('{').trim_end_matches('}');
        Uuid::parse_str(trimmed).map(Self)
    }
}

/// Cursor rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CursorShape {
    #[default]
    Bar,
    Block,
    Underline,
}

/// Settings a surface applies when its profile is updated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    pub font_face: String,
    pub font_size: f32,
    pub color_scheme: String,
    pub cursor_shape: CursorShape,
    /// Lines of history kept above the viewport
    pub history_size: u32,
    pub padding: f32,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            font_face: "Consolas".to_string(),
            font_size: 12.0,
            color_scheme: "Campbell".to_string(),
            cursor_shape: CursorShape::default(),
            history_size: 9001,
            padding: 8.0,
        }
    }
}
