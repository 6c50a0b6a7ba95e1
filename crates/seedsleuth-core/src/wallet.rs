//! Search results and work accounting

use serde::{Deserialize, Serialize};

/// Outcome of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Wallet {
    /// A completion that derives to the target
    Found { mnemonic: String, address: String },
    /// Searched (or cancelled) without a match
    NotFound,
}

impl Wallet {
    pub fn is_found(&self) -> bool {
        matches!(self, Wallet::Found { .. })
    }

    pub fn mnemonic(&self) -> Option<&str> {
        match self {
            Wallet::Found { mnemonic, .. } => Some(mnemonic),
            Wallet::NotFound => None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Wallet::Found { address, .. } => Some(address),
            Wallet::NotFound => None,
        }
    }
}

/// Candidates evaluated, owned by the caller.
///
/// A search only ever increments it, once per complete candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounter(u64);

impl SearchCounter {
    pub fn new() -> Self {
        Self(0)
    }

    /// Start from an earlier total, e.g. when resuming
    pub fn starting_at(count: u64) -> Self {
        Self(count)
    }

    pub fn increment(&mut self) {
        self.0 += 1;
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_accessors() {
        let wallet = Wallet::Found {
            mnemonic: "abandon about".into(),
            address: "1abc".into(),
        };
        assert!(wallet.is_found());
        assert_eq!(wallet.mnemonic(), Some("abandon about"));
        assert_eq!(wallet.address(), Some("1abc"));

        assert!(!Wallet::NotFound.is_found());
        assert_eq!(Wallet::NotFound.mnemonic(), None);
    }

    #[test]
    fn test_wallet_json() {
        let json = serde_json::to_value(Wallet::NotFound).unwrap();
        assert_eq!(json["status"], "not_found");

        let found = Wallet::Found {
            mnemonic: "a b".into(),
            address: "x".into(),
        };
        let json = serde_json::to_string(&found).unwrap();
        assert_eq!(serde_json::from_str::<Wallet>(&json).unwrap(), found);
    }

    #[test]
    fn test_counter() {
        let mut counter = SearchCounter::new();
        counter.increment();
        counter.increment();
        assert_eq!(counter.get(), 2);
        assert_eq!(SearchCounter::starting_at(10).get(), 10);
    }
}
