// file: src/progress.rs
// description: progress reporting and statistics for batch image uploads
// reference: uses indicatif for progress bars

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct UploadStats {
    pub uploaded: usize,
    pub failed: usize,
    pub bytes_in: u64,
    pub duration_secs: f64,
}

impl UploadStats {
    pub fn success_rate(&self) -> f64 {
        let total = self.uploaded + self.failed;
        if total == 0 {
            return 0.0;
        }
        (self.uploaded as f64 / total as f64) * 100.0
    }
}

/// Tracks a batch of concurrent uploads with a single progress bar. Counters
/// are atomics so worker futures can record results without coordination.
pub struct UploadTracker {
    bar: ProgressBar,
    uploaded: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
    bytes_in: Arc<AtomicU64>,
    started: Instant,
}

impl UploadTracker {
    pub fn new(total_files: usize) -> Self {
        let bar = ProgressBar::new(total_files as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
        );
        Self {
            bar,
            uploaded: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            bytes_in: Arc::new(AtomicU64::new(0)),
            started: Instant::now(),
        }
    }

    pub fn record_success(&self, filename: &str, bytes: u64) {
        self.uploaded.fetch_add(1, Ordering::Relaxed);
        self.bytes_in.fetch_add(bytes, Ordering::Relaxed);
        self.bar.set_message(filename.to_string());
        self.bar.inc(1);
    }

    pub fn record_failure(&self, filename: &str) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.bar.set_message(format!("{} {}", "failed:".red(), filename));
        self.bar.inc(1);
    }

    pub fn finish(&self) -> UploadStats {
        self.bar.finish_and_clear();
        UploadStats {
            uploaded: self.uploaded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            bytes_in: self.bytes_in.load(Ordering::Relaxed),
            duration_secs: self.started.elapsed().as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tracker_counts_results() {
        let tracker = UploadTracker::new(3);
        tracker.record_success("a.jpg", 1000);
        tracker.record_success("b.jpg", 2000);
        tracker.record_failure("c.jpg");

        let stats = tracker.finish();
        assert_eq!(stats.uploaded, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.bytes_in, 3000);
    }

    #[test]
    fn test_success_rate() {
        let stats = UploadStats {
            uploaded: 3,
            failed: 1,
            bytes_in: 0,
            duration_secs: 1.0,
        };
        assert!((stats.success_rate() - 75.0).abs() < f64::EPSILON);
        assert_eq!(UploadStats::default().success_rate(), 0.0);
    }
}
