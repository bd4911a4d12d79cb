//! Receipt label generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix of every receipt label.
pub const RECEIPT_PREFIX: &str = "receipt_order_";

/// Produces `receipt_order_<epoch millis>` labels that are unique within the
/// process.
///
/// The millisecond component is strictly increasing: when two calls land in
/// the same millisecond (or the clock steps backwards) the later call uses
/// the previous value plus one.
#[derive(Debug, Default)]
pub struct ReceiptGenerator {
    last: AtomicU64,
}

impl ReceiptGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next receipt label.
    pub fn next_label(&self) -> String {
        format!("{RECEIPT_PREFIX}{}", self.next_millis(now_millis()))
    }

    fn next_millis(&self, now: u64) -> u64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev.saturating_add(1));
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

fn now_millis() -> u64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    u64::try_from(nanos / 1_000_000).unwrap_or_default()
}
