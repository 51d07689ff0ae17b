//! Single-line spinner for the sequential network phases of a sync.

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Spinner that follows the phase a sync is in. Hidden under `--quiet`.
pub(crate) struct PhaseSpinner {
    pb: ProgressBar,
}

impl PhaseSpinner {
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
                pb.set_style(style.tick_chars("/-\\|"));
            }
            pb
        };
        Self { pb }
    }

    /// Start (or restart) ticking with `msg`.
    pub(crate) fn phase(&self, msg: impl Into<String>) {
        self.pb.set_message(msg.into());
        self.pb.enable_steady_tick(TICK);
    }

    pub(crate) fn update(&self, msg: impl Into<String>) {
        self.pb.set_message(msg.into());
    }

    /// Print a line above the spinner without tearing it.
    pub(crate) fn println(&self, f: impl FnOnce()) {
        self.pb.suspend(f);
    }

    pub(crate) fn clear(&self) {
        self.pb.disable_steady_tick();
        self.pb.set_message("");
        self.pb.finish_and_clear();
    }
}

impl Drop for PhaseSpinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
