//! Nonce sources for request signing.
//!
//! Signed requests of one credential set must carry strictly increasing nonces, including
//! when several requests are signed concurrently. [`MonotonicNonce`] guarantees that with a
//! single atomic; [`FixedNonce`] makes signatures reproducible in tests.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Supplies nonces in milliseconds.
pub trait NonceSource: Send + Sync + fmt::Debug {
    /// Next nonce.
    fn next_nonce(&self) -> i64;
}

/// Issues values strictly greater than every value issued before.
#[derive(Debug, Default)]
pub struct StrictlyIncreasing {
    last: AtomicI64,
}

impl StrictlyIncreasing {
    /// Creates a guard that has issued nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `candidate`, or one past the last issued value when `candidate` is not ahead of it.
    pub fn issue(&self, candidate: i64) -> i64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = candidate.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Wall-clock milliseconds, bumped by one whenever the clock has not advanced.
#[derive(Debug, Default)]
pub struct MonotonicNonce {
    guard: StrictlyIncreasing,
}

impl MonotonicNonce {
    /// Creates a source that starts at the current time.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NonceSource for MonotonicNonce {
    fn next_nonce(&self) -> i64 {
        self.guard.issue(crate::time::milliseconds())
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedNonce(pub i64);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_monotonic_strictly_increasing() {
        let nonce = MonotonicNonce::new();
        let mut prev = nonce.next_nonce();
        for _ in 0..1000 {
            let next = nonce.next_nonce();
            assert!(next > prev);
            prev = next;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_monotonic_unique_under_concurrency() {
        let nonce = Arc::new(MonotonicNonce::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let nonce = Arc::clone(&nonce);
                tokio::spawn(async move { (0..250).map(|_| nonce.next_nonce()).collect::<Vec<_>>() })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for n in handle.await.unwrap_or_default() {
                assert!(seen.insert(n), "duplicate nonce {n}");
            }
        }
        assert_eq!(seen.len(), 2000);
    }

    #[test]
    fn test_guard_never_goes_backwards() {
        let guard = StrictlyIncreasing::new();
        assert_eq!(guard.issue(1_000), 1_000);
        assert_eq!(guard.issue(500), 1_001);
        assert_eq!(guard.issue(1_001), 1_002);
        assert_eq!(guard.issue(2_000), 2_000);
    }

    #[test]
    fn test_fixed_nonce() {
        let nonce = FixedNonce(42);
        assert_eq!(nonce.next_nonce(), 42);
        assert_eq!(nonce.next_nonce(), 42);
    }
}
