//! Live search statistics

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use seedsleuth_pattern::{format_duration, format_space};

/// Thread-safe search statistics, shared by every shard.
///
/// `running` doubles as the cancellation signal the engine checks at each
/// recursion level.
#[derive(Debug)]
pub struct SearchStats {
    /// Candidates claimed by shards
    pub candidates_tested: AtomicU64,
    start_time: Instant,
    pub running: AtomicBool,
    pub found: AtomicBool,
}

impl SearchStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Add `count` candidates, returning the new total
    pub fn add_candidates(&self, count: u64) -> u64 {
        self.candidates_tested.fetch_add(count, Ordering::Relaxed) + count
    }

    pub fn total_candidates(&self) -> u64 {
        self.candidates_tested.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn candidates_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_candidates() as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Stop the search (cancel)
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn mark_found(&self) {
        self.found.store(true, Ordering::Relaxed);
        self.stop();
    }

    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Relaxed)
    }

    /// Progress line against the full search space
    pub fn format(&self, total_space: u128) -> String {
        let tested = self.total_candidates();
        let rate = self.candidates_per_second();

        let progress = if total_space > 0 {
            (tested as f64 / total_space as f64).min(1.0)
        } else {
            0.0
        };

        let remaining = total_space.saturating_sub(u128::from(tested));
        let eta = if remaining == 0 {
            "now".to_string()
        } else if rate > 0.0 {
            format_duration(remaining as f64 / rate)
        } else {
            "?".to_string()
        };

        format!(
            "[{:.1} cand/s][Tested {}/{}][{:.2}%][Left {}]",
            rate,
            format_space(u128::from(tested)),
            format_space(total_space),
            progress * 100.0,
            eta
        )
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            candidates_tested: AtomicU64::new(0),
            start_time: Instant::now(),
            running: AtomicBool::new(true),
            found: AtomicBool::new(false),
        }
    }
}
