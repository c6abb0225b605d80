//! Progress tracking with indicatif
//!
//! A thin facade over two bars (candidate discovery, header decoding) backed
//! by atomic counters so parallel workers update lock-free. Silent mode is
//! selected automatically for non-TTY output so piped runs stay clean.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Progress display modes
#[derive(Debug, Clone, Copy)]
pub enum ProgressMode {
    /// No bars (non-TTY or quiet runs)
    Silent,
    /// Live bars with completed/total counts
    Visible,
}

#[derive(Clone)]
pub struct ProgressTracker {
    multi: Option<Arc<MultiProgress>>,
    discovery_bar: Option<Arc<ProgressBar>>,
    decode_bar: Option<Arc<ProgressBar>>,
    completed: Arc<AtomicUsize>,
}

impl ProgressTracker {
    /// Create a tracker, downgrading to Silent when stdout is not a TTY
    pub fn new(enabled: bool) -> Self {
        let mode = if enabled && atty::is(atty::Stream::Stdout) {
            ProgressMode::Visible
        } else {
            ProgressMode::Silent
        };
        Self::with_mode(mode)
    }

    pub fn with_mode(mode: ProgressMode) -> Self {
        let (multi, discovery_bar, decode_bar) = match mode {
            ProgressMode::Silent => (None, None, None),
            ProgressMode::Visible => {
                let multi = Arc::new(MultiProgress::new());

                let discovery = Arc::new(multi.add(ProgressBar::new_spinner()));
                discovery.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg} [{elapsed_precise}]")
                        .unwrap(),
                );

                let decode = Arc::new(multi.add(ProgressBar::new(0)));
                decode.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} {msg} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len}",
                        )
                        .unwrap()
                        .progress_chars("█▉▊▋▌▍▎▏  "),
                );

                (Some(multi), Some(discovery), Some(decode))
            }
        };

        Self {
            multi,
            discovery_bar,
            decode_bar,
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn start_discovery(&self) {
        if let Some(ref bar) = self.discovery_bar {
            bar.set_message("Discovering recordings");
            bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    pub fn finish_discovery(&self, total: usize) {
        if let Some(ref bar) = self.discovery_bar {
            bar.finish_with_message(format!("Discovered {total} recordings"));
        }
    }

    pub fn start_decoding(&self, total: usize) {
        if let Some(ref bar) = self.decode_bar {
            bar.set_length(total as u64);
            bar.set_message("Reading headers");
            bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Bump the monotone completed counter; returns the new value
    pub fn increment_completed(&self) -> usize {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(ref bar) = self.decode_bar {
            bar.set_position(completed as u64);
        }
        completed
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn finish(&self) {
        if let Some(ref bar) = self.decode_bar {
            let completed = self.completed();
            bar.finish_with_message(format!("Read {completed} headers"));
        }
        if let Some(ref multi) = self.multi {
            multi.clear().ok();
        }
    }
}
