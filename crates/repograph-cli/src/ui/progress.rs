//! Progress bar driven by the analyzer's progress callback.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use repograph_analysis::Progress;

/// A bar that tracks extracted files.
///
/// Hidden when output is not interactive, so callers can drive it
/// unconditionally.
#[derive(Clone)]
pub struct AnalysisProgress {
    bar: ProgressBar,
}

impl AnalysisProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid template")
                .progress_chars("█▓▒░"),
        );
        bar.set_message("extracting");
        if visible {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        Self { bar }
    }

    /// Callback for [`repograph_analysis::Analyzer::on_progress`].
    pub fn callback(&self) -> impl Fn(Progress) + Send + Sync + 'static {
        let bar = self.bar.clone();
        move |progress: Progress| {
            bar.set_length(progress.total as u64);
            bar.set_position(progress.completed as u64);
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_moves_hidden_bar() {
        let progress = AnalysisProgress::new(false);
        let callback = progress.callback();
        callback(Progress {
            completed: 3,
            total: 10,
        });
        assert_eq!(progress.position(), 3);
        progress.finish();
    }
}
