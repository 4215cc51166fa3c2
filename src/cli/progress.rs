//! Catalog load progress for the CLI
//!
//! Adapts to the output context:
//! - TTY mode: an indicatif progress bar on stderr
//! - Non-TTY mode: one line per finished category
//! - Robot mode: JSON progress events on stderr
//! - Quiet mode: nothing

use std::io::IsTerminal;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::store::{LoadOutcome, LoadProgress};

/// Progress output mode based on terminal capabilities and user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Tty,
    NonTty,
    Robot,
    Quiet,
}

impl ProgressMode {
    /// Detect the appropriate progress mode based on environment
    #[must_use]
    pub fn detect(robot_mode: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if robot_mode {
            Self::Robot
        } else if std::io::stderr().is_terminal() {
            Self::Tty
        } else {
            Self::NonTty
        }
    }
}

/// JSON progress event for robot mode
#[derive(Debug, Clone, Serialize)]
struct ProgressEvent<'a> {
    #[serde(rename = "type")]
    event_type: &'static str,
    category: &'a str,
    completed: usize,
    loaded: usize,
    total: usize,
    outcome: &'a LoadOutcome,
    timestamp: String,
}

/// Renders [`LoadProgress`] events for the current output mode.
pub struct LoadProgressView {
    mode: ProgressMode,
    bar: Option<ProgressBar>,
}

impl LoadProgressView {
    #[must_use]
    pub fn new(mode: ProgressMode, total: usize) -> Self {
        let bar = (mode == ProgressMode::Tty && total > 0).then(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
                    .expect("valid template")
                    .progress_chars("█▓▒░"),
            );
            bar.set_message("Loading catalogs");
            bar
        });
        Self { mode, bar }
    }

    pub fn update(&self, event: &LoadProgress) {
        match self.mode {
            ProgressMode::Quiet => {}
            ProgressMode::Robot => {
                let json = serde_json::to_string(&ProgressEvent {
                    event_type: "progress",
                    category: &event.category,
                    completed: event.completed,
                    loaded: event.loaded,
                    total: event.total,
                    outcome: &event.outcome,
                    timestamp: Utc::now().to_rfc3339(),
                });
                if let Ok(json) = json {
                    eprintln!("{json}");
                }
            }
            ProgressMode::NonTty => {
                eprintln!("[cidx] {}", describe(event));
            }
            ProgressMode::Tty => {
                if let Some(bar) = &self.bar {
                    bar.set_position(event.completed as u64);
                    bar.set_message(describe(event));
                }
            }
        }
    }

    pub fn finish(&self, loaded: usize, total: usize) {
        if let Some(bar) = &self.bar {
            if loaded == total {
                bar.finish_with_message(format!("✓ Loaded {loaded} categories"));
            } else {
                bar.finish_with_message(format!("! Loaded {loaded}/{total} categories"));
            }
        }
    }
}

fn describe(event: &LoadProgress) -> String {
    match &event.outcome {
        LoadOutcome::Loaded { base_items, .. } => format!(
            "{} ({base_items} items) {}/{}",
            event.category, event.loaded, event.total
        ),
        LoadOutcome::Failed { code, .. } => format!(
            "{} failed [{code}] {}/{}",
            event.category, event.loaded, event.total
        ),
    }
}
