//! Server clock offset for Binance signing.
//!
//! Binance rejects signed requests whose `timestamp` drifts too far from its own clock.
//! [`TimeDifference`] caches the measured offset so the signer can shift its nonces
//! without a round-trip per request.
//!
//! ```rust
//! use xchange_exchanges::binance::time_sync::TimeDifference;
//!
//! let diff = TimeDifference::new();
//! // Local clock read 1_000 before and 1_010 after a server reply of 900.
//! diff.record(1_000, 1_010, 900);
//! assert_eq!(diff.offset(), 105);
//! assert_eq!(diff.adjust(2_000), 1_895);
//! ```

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

/// Local clock minus server clock, in milliseconds.
#[derive(Debug, Default)]
pub struct TimeDifference {
    offset: AtomicI64,
    initialized: AtomicBool,
}

impl TimeDifference {
    /// Creates an unmeasured offset of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a measurement has been recorded.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Current offset.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.offset.load(Ordering::Acquire)
    }

    /// Records a measurement taken between two local clock reads.
    ///
    /// The server time is compared against the midpoint of `before` and `after`.
    pub fn record(&self, before: i64, after: i64, server_time: i64) -> i64 {
        let midpoint = before + (after - before) / 2;
        let offset = midpoint.saturating_sub(server_time);
        self.offset.store(offset, Ordering::Release);
        self.initialized.store(true, Ordering::Release);
        offset
    }

    /// Converts a local timestamp into the server's clock.
    #[inline]
    pub fn adjust(&self, local: i64) -> i64 {
        local.saturating_sub(self.offset())
    }

    /// Forgets the measurement.
    pub fn reset(&self) {
        self.offset.store(0, Ordering::Release);
        self.initialized.store(false, Ordering::Release);
    }
}
