// file: src/reconcile/progress.rs
// description: progress tracking and statistics reporting for a reconciliation run
// reference: uses indicatif for progress bars and tracks mutation counts

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub repositories_processed: usize,
    pub repositories_skipped: usize,
    pub labels_created: usize,
    pub labels_already_existing: usize,
    pub labels_deleted: usize,
    pub mutations_failed: usize,
    pub duration_secs: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mutations_attempted(&self) -> usize {
        self.labels_created
            + self.labels_already_existing
            + self.labels_deleted
            + self.mutations_failed
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.mutations_attempted();
        if total == 0 {
            return 100.0;
        }
        ((total - self.mutations_failed) as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    repositories_processed: AtomicUsize,
    repositories_skipped: AtomicUsize,
    labels_created: AtomicUsize,
    labels_already_existing: AtomicUsize,
    labels_deleted: AtomicUsize,
    mutations_failed: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_repositories: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();
        let main_bar = create_progress_bar(&multi_progress, total_repositories as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);
        Self::from_bars(main_bar, detail_bar)
    }

    /// Tracker that counts without drawing anything.
    pub fn hidden() -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let main_bar = multi_progress.add(ProgressBar::hidden());
        let detail_bar = multi_progress.add(ProgressBar::hidden());
        Self::from_bars(main_bar, detail_bar)
    }

    fn from_bars(main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            repositories_processed: AtomicUsize::new(0),
            repositories_skipped: AtomicUsize::new(0),
            labels_created: AtomicUsize::new(0),
            labels_already_existing: AtomicUsize::new(0),
            labels_deleted: AtomicUsize::new(0),
            mutations_failed: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn start_repository(&self, name: &str) {
        self.main_bar.set_message(name.to_string());
    }

    pub fn inc_repositories_processed(&self) {
        self.repositories_processed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_repositories_skipped(&self) {
        self.repositories_skipped.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_created(&self) {
        self.labels_created.fetch_add(1, Ordering::SeqCst);
    }

    pub fn inc_already_existing(&self) {
        self.labels_already_existing.fetch_add(1, Ordering::SeqCst);
    }

    pub fn inc_deleted(&self) {
        self.labels_deleted.fetch_add(1, Ordering::SeqCst);
    }

    pub fn inc_failed(&self) {
        self.mutations_failed.fetch_add(1, Ordering::SeqCst);
    }

    /// Prints a log line above the bars instead of tearing through them.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.main_bar.suspend(f)
    }

    pub fn finish(&self) {
        if !self.main_bar.is_finished() {
            self.main_bar.finish_with_message("Reconciliation complete");
        }
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> RunStats {
        RunStats {
            repositories_processed: self.repositories_processed.load(Ordering::SeqCst),
            repositories_skipped: self.repositories_skipped.load(Ordering::SeqCst),
            labels_created: self.labels_created.load(Ordering::SeqCst),
            labels_already_existing: self.labels_already_existing.load(Ordering::SeqCst),
            labels_deleted: self.labels_deleted.load(Ordering::SeqCst),
            mutations_failed: self.mutations_failed.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let created = self.labels_created.load(Ordering::SeqCst);
        let deleted = self.labels_deleted.load(Ordering::SeqCst);
        let failed = self.mutations_failed.load(Ordering::SeqCst);

        let message = format!(
            "Created: {} | Deleted: {} | Failed: {}",
            created, deleted, failed
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn bar_style(template: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|e| {
            warn!("Invalid progress template: {}", e);
            ProgressStyle::default_bar()
        })
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            bar_style("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            bar_style("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    bar.set_style(bar_style("{msg}"));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_calculations() {
        let stats = RunStats {
            labels_created: 6,
            labels_deleted: 2,
            labels_already_existing: 1,
            mutations_failed: 1,
            ..RunStats::new()
        };

        assert_eq!(stats.mutations_attempted(), 10);
        assert!((stats.success_rate() - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_run_stats_no_mutations() {
        assert_eq!(RunStats::new().success_rate(), 100.0);
    }

    #[test]
    fn test_progress_tracker_counts() {
        let tracker = ProgressTracker::hidden();

        tracker.start_repository("api");
        tracker.inc_created();
        tracker.inc_created();
        tracker.inc_deleted();
        tracker.inc_failed();
        tracker.inc_repositories_processed();
        tracker.inc_repositories_skipped();

        let stats = tracker.get_stats();
        assert_eq!(stats.repositories_processed, 1);
        assert_eq!(stats.repositories_skipped, 1);
        assert_eq!(stats.labels_created, 2);
        assert_eq!(stats.labels_deleted, 1);
        assert_eq!(stats.mutations_failed, 1);
    }
}
