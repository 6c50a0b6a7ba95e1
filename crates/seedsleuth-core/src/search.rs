//! Recovery search engine

use std::ops::Range;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use seedsleuth_address::{AddressError, AddressPipeline};
use seedsleuth_pattern::checksum::VALID_WORD_COUNTS;
use seedsleuth_pattern::{format_space, search_space, PatternError, WordPattern, Wordlist};

use crate::engine::{brute_force_seed_phrase, EngineContext};
use crate::stats::SearchStats;
use crate::wallet::{SearchCounter, Wallet};

/// Shards handed to each worker thread
const SHARDS_PER_THREAD: usize = 4;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of threads (0 = auto)
    pub threads: usize,
    /// Maximum candidates (0 = unlimited)
    pub max_candidates: u64,
    /// Skip candidates failing the BIP39 checksum before key derivation
    pub require_valid_checksum: bool,
    /// Print a progress line to stderr
    pub progress: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: 0, // Auto-detect
            max_candidates: 0,
            require_valid_checksum: false,
            progress: false,
        }
    }
}

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub wallet: Wallet,
    /// Candidates evaluated (checksum-skipped ones included)
    pub candidates_tested: u64,
    pub time_secs: f64,
    pub candidates_per_second: f64,
    /// Stopped by cancellation or the candidate limit before exhausting the space
    pub cancelled: bool,
}

/// One recovery job: pipeline, pattern, candidate words and target
pub struct RecoverySearch {
    pipeline: AddressPipeline,
    pattern: WordPattern,
    wordlist: Wordlist,
    target: String,
    config: SearchConfig,
}

impl RecoverySearch {
    /// Validate the inputs; nothing is evaluated yet
    pub fn new(
        pipeline: AddressPipeline,
        pattern: WordPattern,
        wordlist: Wordlist,
        target: &str,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        let scheme = pipeline.scheme();
        scheme.validate()?;
        scheme.validate_target(target)?;
        let target = scheme.normalize_target(target);

        if config.require_valid_checksum {
            if !wordlist.is_bip39_sized() {
                return Err(SearchError::InvalidInput(format!(
                    "checksum filtering needs the 2048-word BIP39 list, got {} words",
                    wordlist.len()
                )));
            }
            if !VALID_WORD_COUNTS.contains(&pattern.len()) {
                return Err(SearchError::InvalidInput(format!(
                    "checksum filtering needs 12, 15, 18, 21 or 24 words, got {}",
                    pattern.len()
                )));
            }
            pattern.check_words(&wordlist)?;
        } else if let Err(e) = pattern.check_words(&wordlist) {
            warn!("{}", e);
        }

        Ok(Self {
            pipeline,
            pattern,
            wordlist,
            target,
            config,
        })
    }

    pub fn pipeline(&self) -> &AddressPipeline {
        &self.pipeline
    }

    pub fn pattern(&self) -> &WordPattern {
        &self.pattern
    }

    /// Normalized target
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// |wordlist|^k
    pub fn search_space(&self) -> u128 {
        search_space(self.wordlist.len(), self.pattern.placeholder_count())
    }

    fn context<'s>(&'s self, stats: &'s SearchStats) -> EngineContext<'s> {
        let ctx = EngineContext::new(
            &self.pipeline,
            &self.wordlist,
            self.pattern.missing_indices(),
            &self.target,
        )
        .with_stats(stats, self.config.max_candidates);

        if self.config.require_valid_checksum {
            ctx.with_checksum(&self.wordlist)
        } else {
            ctx
        }
    }

    /// Whole search on the calling thread
    pub fn run_sequential(&self, counter: &mut SearchCounter) -> Wallet {
        let stats = SearchStats::default();
        self.sequential(counter, &stats)
    }

    fn sequential(&self, counter: &mut SearchCounter, stats: &SearchStats) -> Wallet {
        let ctx = self.context(stats);
        let mut slots = self.pattern.slots();
        brute_force_seed_phrase(&ctx, &mut slots, 0, counter)
    }

    /// Search only outermost-word choices `range` (wordlist positions).
    ///
    /// Disjoint ranges cover disjoint candidates, so shards can run anywhere
    /// and be resumed independently.
    pub fn run_shard(&self, range: Range<usize>, counter: &mut SearchCounter, stats: &SearchStats) -> Wallet {
        let ctx = self.context(stats);
        let mut slots = self.pattern.slots();

        let Some(&outer) = self.pattern.missing_indices().first() else {
            // Single candidate lives in shard 0
            return if range.contains(&0) {
                brute_force_seed_phrase(&ctx, &mut slots, 0, counter)
            } else {
                Wallet::NotFound
            };
        };

        for i in range.start..range.end.min(self.wordlist.len()) {
            if !stats.is_running() {
                break;
            }
            let Some(word) = self.wordlist.get(i) else {
                break;
            };
            slots[outer] = word;
            let wallet = brute_force_seed_phrase(&ctx, &mut slots, 1, counter);
            if wallet.is_found() {
                return wallet;
            }
        }

        Wallet::NotFound
    }

    /// Run the search (blocking until found, exhausted or cancelled)
    pub fn run(&self) -> Result<SearchResult, SearchError> {
        self.run_with_stats(&SearchStats::new())
    }

    /// Like [`run`](Self::run); stopping `stats` from another thread cancels
    pub fn run_with_stats(&self, stats: &Arc<SearchStats>) -> Result<SearchResult, SearchError> {
        let num_threads = if self.config.threads == 0 {
            num_cpus::get()
        } else {
            self.config.threads
        };
        let k = self.pattern.placeholder_count();
        let space = self.search_space();

        info!(
            "Searching {} candidates ({} unknown words, {} in wordlist, {} threads)",
            format_space(space),
            k,
            self.wordlist.len(),
            num_threads
        );

        let pool = if num_threads > 1 && k > 0 {
            Some(rayon::ThreadPoolBuilder::new().num_threads(num_threads).build()?)
        } else {
            None
        };

        // Spawn stats printer thread
        let printer_handle = self.config.progress.then(|| {
            let stats_for_printer = stats.clone();
            thread::spawn(move || {
                while stats_for_printer.is_running() {
                    eprint!("\r{}", stats_for_printer.format(space));
                    thread::sleep(Duration::from_millis(250));
                }
                eprintln!(); // New line after stats
            })
        });

        let (wallet, candidates_tested) = match pool {
            Some(pool) => self.run_parallel(&pool, num_threads, stats),
            None => {
                let mut counter = SearchCounter::new();
                let wallet = self.sequential(&mut counter, stats);
                (wallet, counter.get())
            }
        };

        // A stop raced with the last candidate still counts as exhaustion
        let cancelled = !wallet.is_found() && !stats.is_running() && u128::from(candidates_tested) < space;
        stats.stop();
        if let Some(handle) = printer_handle {
            let _ = handle.join();
        }

        let time_secs = stats.elapsed().as_secs_f64();
        let candidates_per_second = if time_secs > 0.0 {
            candidates_tested as f64 / time_secs
        } else {
            0.0
        };

        info!(
            "Search finished: {} after {} candidates in {:.2}s{}",
            if wallet.is_found() { "found" } else { "not found" },
            candidates_tested,
            time_secs,
            if cancelled { " (stopped early)" } else { "" }
        );

        Ok(SearchResult {
            wallet,
            candidates_tested,
            time_secs,
            candidates_per_second,
            cancelled,
        })
    }

    fn run_parallel(&self, pool: &rayon::ThreadPool, num_threads: usize, stats: &SearchStats) -> (Wallet, u64) {
        // Channel for the winner
        let (tx, rx): (Sender<Wallet>, Receiver<Wallet>) = bounded(1);
        let shards = shard_ranges(self.wordlist.len(), num_threads * SHARDS_PER_THREAD);

        let candidates_tested = pool.install(|| {
            shards
                .into_par_iter()
                .map(|range| {
                    let mut counter = SearchCounter::new();
                    let wallet = self.run_shard(range.clone(), &mut counter, stats);
                    debug!("Shard {:?} done after {} candidates", range, counter.get());

                    if wallet.is_found() {
                        let _ = tx.try_send(wallet);
                        stats.mark_found();
                    }
                    counter.get()
                })
                .sum::<u64>()
        });

        (rx.try_recv().unwrap_or(Wallet::NotFound), candidates_tested)
    }
}

/// Split `0..len` into at most `shards` contiguous, disjoint ranges
fn shard_ranges(len: usize, shards: usize) -> Vec<Range<usize>> {
    let shards = shards.clamp(1, len.max(1));
    let size = len.div_ceil(shards).max(1);
    (0..len).step_by(size).map(|start| start..(start + size).min(len)).collect()
}
