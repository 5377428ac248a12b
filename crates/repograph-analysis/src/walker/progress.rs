//! Throttled progress notifications from extraction workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use parking_lot::Mutex;

use crate::config::{PROGRESS_EVERY_FILES, PROGRESS_INTERVAL, Progress, ProgressFn};

/// Counts finished files and forwards a throttled subset to the callback.
///
/// Workers never wait on each other here: a worker that cannot take the
/// throttle lock immediately skips its notification.
pub(crate) struct ProgressReporter {
    total: usize,
    completed: AtomicUsize,
    last_emit: Mutex<Instant>,
    callback: Option<ProgressFn>,
}

impl ProgressReporter {
    pub(crate) fn new(total: usize, callback: Option<ProgressFn>) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
            last_emit: Mutex::new(Instant::now()),
            callback,
        }
    }

    pub(crate) fn tick(&self) {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        let Some(callback) = &self.callback else {
            return;
        };
        let Some(mut last) = self.last_emit.try_lock() else {
            return;
        };
        if completed % PROGRESS_EVERY_FILES == 0 || last.elapsed() >= PROGRESS_INTERVAL {
            *last = Instant::now();
            drop(last);
            callback(Progress {
                completed,
                total: self.total,
            });
        }
    }

    /// Emit the final count unconditionally.
    pub(crate) fn finish(&self) {
        if let Some(callback) = &self.callback {
            callback(Progress {
                completed: self.completed.load(Ordering::Relaxed),
                total: self.total,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn throttles_to_every_fifty_files() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressFn = Arc::new(move |p: Progress| sink.lock().push(p.completed));
        let reporter = ProgressReporter::new(120, Some(callback));

        for _ in 0..120 {
            reporter.tick();
        }
        reporter.finish();

        let seen = seen.lock();
        assert!(seen.contains(&50));
        assert!(seen.contains(&100));
        assert_eq!(seen.last(), Some(&120));
        // Fast ticks stay far below one notification per file.
        assert!(seen.len() < 10, "{seen:?}");
    }

    #[test]
    fn silent_without_callback() {
        let reporter = ProgressReporter::new(3, None);
        reporter.tick();
        reporter.finish();
        assert_eq!(reporter.completed.load(Ordering::Relaxed), 1);
    }
}
