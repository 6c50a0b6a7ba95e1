//! Recursive brute-force over missing words

use seedsleuth_address::AddressPipeline;
use seedsleuth_pattern::checksum::is_valid_mnemonic;
use seedsleuth_pattern::Wordlist;

use crate::stats::SearchStats;
use crate::wallet::{SearchCounter, Wallet};

/// Read-only state shared by every level of one search
#[derive(Clone, Copy)]
pub struct EngineContext<'a> {
    pub pipeline: &'a AddressPipeline,
    pub wordlist: &'a Wordlist,
    /// Slot positions to fill, outermost first
    pub missing: &'a [usize],
    /// Target already passed through `AddressScheme::normalize_target`
    pub target: &'a str,
    /// Full BIP39 list; when set, checksum-invalid candidates skip derivation
    pub checksum_wordlist: Option<&'a Wordlist>,
    /// Shared progress and cancellation
    pub stats: Option<&'a SearchStats>,
    /// 0 = unlimited, otherwise counted against `stats`
    pub max_candidates: u64,
}

impl<'a> EngineContext<'a> {
    pub fn new(
        pipeline: &'a AddressPipeline,
        wordlist: &'a Wordlist,
        missing: &'a [usize],
        target: &'a str,
    ) -> Self {
        Self {
            pipeline,
            wordlist,
            missing,
            target,
            checksum_wordlist: None,
            stats: None,
            max_candidates: 0,
        }
    }

    pub fn with_checksum(mut self, bip39: &'a Wordlist) -> Self {
        self.checksum_wordlist = Some(bip39);
        self
    }

    pub fn with_stats(mut self, stats: &'a SearchStats, max_candidates: u64) -> Self {
        self.stats = Some(stats);
        self.max_candidates = max_candidates;
        self
    }

    fn cancelled(&self) -> bool {
        self.stats.is_some_and(|s| !s.is_running())
    }

    /// Reserve one candidate against the shared limit.
    ///
    /// The search only stops on a claim past the limit, so a limit equal to
    /// the search space lets the space finish uncancelled.
    fn claim(&self) -> bool {
        let Some(stats) = self.stats else {
            return true;
        };
        let total = stats.add_candidates(1);
        if self.max_candidates > 0 && total > self.max_candidates {
            stats.stop();
            return false;
        }
        true
    }
}

/// Evaluate one complete mnemonic
pub fn brute_find_wallet(pipeline: &AddressPipeline, mnemonic: &str, normalized_target: &str) -> Wallet {
    match pipeline.matches(mnemonic, normalized_target) {
        Some(address) => Wallet::Found {
            mnemonic: mnemonic.to_string(),
            address,
        },
        None => Wallet::NotFound,
    }
}

/// Depth-first search filling `ctx.missing[depth..]` in wordlist order.
///
/// `slots` holds the known words; positions listed in `ctx.missing` are
/// overwritten. Returns the first match. The counter is incremented once per
/// complete candidate and never reset.
pub fn brute_force_seed_phrase<'a>(
    ctx: &EngineContext<'a>,
    slots: &mut [&'a str],
    depth: usize,
    counter: &mut SearchCounter,
) -> Wallet {
    if ctx.cancelled() {
        return Wallet::NotFound;
    }

    let Some(&position) = ctx.missing.get(depth) else {
        if !ctx.claim() {
            return Wallet::NotFound;
        }
        counter.increment();

        if let Some(bip39) = ctx.checksum_wordlist {
            if !is_valid_mnemonic(slots, bip39) {
                return Wallet::NotFound;
            }
        }

        let mnemonic = slots.join(" ");
        return brute_find_wallet(ctx.pipeline, &mnemonic, ctx.target);
    };

    if position >= slots.len() {
        return Wallet::NotFound;
    }

    let wordlist: &'a Wordlist = ctx.wordlist;
    for word in wordlist.iter() {
        slots[position] = word;
        let wallet = brute_force_seed_phrase(ctx, slots, depth + 1, counter);
        if wallet.is_found() {
            return wallet;
        }
        if ctx.cancelled() {
            break;
        }
    }

    Wallet::NotFound
}
