//! Terminal rendering of operation events.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tsm::{Event, Observer};

/// Observer that draws download progress and prints warnings
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    /// Observer with a visible download bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Self { bar }
    }

    /// Observer that never draws, for machine-readable output
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn notify(&self, event: &Event) {
        match event {
            Event::Progress(p) => {
                self.bar.set_length(p.received + p.remaining);
                self.bar.set_position(p.received);
            }
            Event::Downloaded => self.bar.finish_with_message("downloaded"),
            Event::Warn(msg) => {
                self.bar.suspend(|| eprintln!("{} {msg}", "Warning:".yellow().bold()));
            }
            Event::Debug(msg) => tracing::debug!("{msg}"),
            Event::Done => {
                if !self.bar.is_finished() {
                    self.bar.finish_and_clear();
                }
            }
        }
    }
}
