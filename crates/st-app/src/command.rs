// ABOUTME: Line commands understood by the headless driver.
// ABOUTME: Parses one command per line into operations on the tab.

use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;

use st_core::{Direction, Size, SplitOrientation};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Split {
        orientation: SplitOrientation,
        ratio: Option<f32>,
        profile: Option<String>,
    },
    Resize(Size),
    Grow(Direction),
    Focus(Direction),
    Close,
    /// The active pane's shell exits on its own
    Exit,
    Scroll(i32),
    Title(String),
    Icon(String),
    Settings {
        profile: String,
        font_size: f32,
    },
    Show,
}

fn parse_direction(word: &str) -> Result<Direction> {
    match word {
        "left" | "h" => Ok(Direction::Left),
        "right" | "l" => Ok(Direction::Right),
        "up" | "k" => Ok(Direction::Up),
        "down" | "j" => Ok(Direction::Down),
        other => bail!("unknown direction '{}'", other),
    }
}

fn parse_orientation(word: &str) -> Result<SplitOrientation> {
    match word {
        "h" | "horizontal" => Ok(SplitOrientation::Horizontal),
        "v" | "vertical" => Ok(SplitOrientation::Vertical),
        other => bail!("unknown split orientation '{}'", other),
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let mut arg = |what: &str| {
            words
                .next()
                .ok_or_else(|| anyhow!("'{}' needs {}", name, what))
        };

        let command = match name {
            "split" => {
                let orientation = parse_orientation(arg("an orientation")?)?;
                let ratio = match arg("") {
                    Ok(word) => Some(word.parse().context("bad split ratio")?),
                    Err(_) => None,
                };
                let profile = arg("").ok().map(str::to_string);
                Command::Split {
                    orientation,
                    ratio,
                    profile,
                }
            }
            "resize" => {
                let width = arg("a width")?.parse().context("bad width")?;
                let height = arg("a height")?.parse().context("bad height")?;
                Command::Resize(Size::new(width, height))
            }
            "grow" => Command::Grow(parse_direction(arg("a direction")?)?),
            "focus" => Command::Focus(parse_direction(arg("a direction")?)?),
            "close" => Command::Close,
            "exit" => Command::Exit,
            "scroll" => Command::Scroll(arg("a line count")?.parse().context("bad line count")?),
            "title" => {
                let rest = line.trim_start()[name.len()..].trim();
                if rest.is_empty() {
                    bail!("'title' needs some text");
                }
                Command::Title(rest.to_string())
            }
            "icon" => Command::Icon(arg("a path")?.to_string()),
            "settings" => Command::Settings {
                profile: arg("a profile")?.to_string(),
                font_size: arg("a font size")?.parse().context("bad font size")?,
            },
            "show" => Command::Show,
            other => bail!("unknown command '{}'", other),
        };
        Ok(command)
    }
}
