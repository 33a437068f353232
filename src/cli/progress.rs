//! Terminal progress bar for estimated progress

use crate::cli::style::bar_style;
use assassin::submit::ProgressSink;
use async_trait::async_trait;
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, Ordering};

/// Progress sink drawing an indicatif bar on stderr
///
/// Once the request settles the bar is either completed (success) or
/// cleared (failure); the later reset to 0 is not drawn.
pub struct BarProgress {
    bar: ProgressBar,
    settled: AtomicBool,
}

impl BarProgress {
    /// Create a hidden-until-first-tick bar with the given label
    pub fn new(label: &'static str) -> Self {
        let bar = ProgressBar::new(100).with_style(bar_style()).with_message(label);
        Self {
            bar,
            settled: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl ProgressSink for BarProgress {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    async fn on_progress(&self, percent: f64) {
        let position = percent.clamp(0.0, 100.0).round() as u64;
        if !self.settled.load(Ordering::Acquire) {
            self.bar.set_position(position);
        } else if position == 100 {
            self.bar.set_position(100);
            self.bar.finish();
        }
    }

    async fn on_settled(&self, succeeded: bool) {
        self.settled.store(true, Ordering::Release);
        if !succeeded {
            self.bar.finish_and_clear();
        }
    }
}
