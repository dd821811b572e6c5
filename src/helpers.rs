use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static CUR_NONCE: AtomicU64 = AtomicU64::new(0);

fn now_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Next signing nonce: current time in milliseconds, bumped past the previous
/// value so two signatures in the same millisecond never collide.
pub fn next_nonce() -> u64 {
    let now = now_timestamp_ms();
    let mut prev = CUR_NONCE.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match CUR_NONCE.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => prev = observed,
        }
    }
}
