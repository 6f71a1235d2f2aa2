// ABOUTME: Entry point for the headless splitterm driver.
// ABOUTME: Reads layout commands from a script or stdin and prints the resulting layout as JSON.

mod command;
mod driver;

use std::io::{self, BufRead, BufReader};

use anyhow::{Context, Result};
use st_core::LayoutConfig;
use st_layout::LayoutSnapshot;
use tracing_subscriber::EnvFilter;

use command::Command;
use driver::Driver;

fn print_snapshot(snapshot: &LayoutSnapshot) -> Result<()> {
    tracing::debug!(
        "Layout rooted at {} with {} panes",
        snapshot.id(),
        snapshot.leaf_count()
    );
    let json = serde_json::to_string_pretty(snapshot)?;
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();
    tracing::info!("Starting splitterm");

    let input: Box<dyn BufRead> = match std::env::args().nth(1) {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("failed to open script {}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let config = LayoutConfig::load_or_default();
    tracing::debug!("Layout config: {:?}", config);
    let mut driver = Driver::new(config);

    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!("Line {}: {:#}", number + 1, e);
                continue;
            }
        };
        match driver.execute(command) {
            Ok(Some(snapshot)) => print_snapshot(&snapshot)?,
            Ok(None) => {}
            Err(e) => tracing::warn!("Line {}: {:#}", number + 1, e),
        }

        if driver.is_finished() {
            tracing::info!("All panes closed, exiting");
            return Ok(());
        }
    }

    if let Some(snapshot) = driver.snapshot() {
        print_snapshot(&snapshot)?;
    }
    Ok(())
}
