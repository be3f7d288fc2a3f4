//! Progress display for batch operations (folder loading, serigraph runs)

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static COUNTED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static OPEN_ENDED_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("[{elapsed_precise}] {prefix} {spinner} {pos} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Single progress bar that is reused across phases
///
/// A hidden manager accepts every call and draws nothing, so callers do not
/// need to branch on quiet mode.
pub struct ProgressManager {
    bar: ProgressBar,
    hidden: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to stderr
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new(0),
            hidden: false,
        }
    }

    /// Create a manager that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden()),
            hidden: true,
        }
    }

    fn fresh_bar(&self, length: Option<u64>) -> ProgressBar {
        if self.hidden {
            ProgressBar::with_draw_target(length, ProgressDrawTarget::hidden())
        } else {
            length.map_or_else(ProgressBar::new_spinner, ProgressBar::new)
        }
    }

    /// Start a phase with a known number of steps
    pub fn start(&mut self, label: &str, total: usize) {
        self.bar = self.fresh_bar(Some(total as u64));
        self.bar.set_style(COUNTED_STYLE.clone());
        self.bar.set_prefix(label.to_string());
    }

    /// Start a phase whose length is bounded by time rather than a count
    pub fn start_open_ended(&mut self, label: &str) {
        self.bar = self.fresh_bar(None);
        self.bar.set_style(OPEN_ENDED_STYLE.clone());
        self.bar.set_prefix(label.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(120));
    }

    /// Record one finished step
    pub fn advance(&mut self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.inc(1);
    }

    /// Number of steps recorded in the current phase
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the current phase
    pub fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}
