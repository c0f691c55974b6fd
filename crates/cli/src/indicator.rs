//! Terminal loading indicator.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use client::ProgressIndicator;
use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(120);

/// A stderr spinner shown while any request is pending.
///
/// indicatif draws nothing when stderr is not a terminal.
#[derive(Debug, Default)]
pub struct SpinnerIndicator {
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressIndicator for SpinnerIndicator {
    fn show(&self) {
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner()
            .with_style(style)
            .with_message("Waiting for the server");
        bar.enable_steady_tick(TICK);

        let previous = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(bar);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn hide(&self) {
        let current = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(bar) = current {
            bar.finish_and_clear();
        }
    }
}
