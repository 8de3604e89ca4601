//! Fixed-window request rate limiting
//!
//! Per-caller request counters in a mutex-guarded in-memory map, entirely
//! decoupled from the scoring core. Windows reset when their fixed length
//! elapses; stale entries are pruned lazily once the map grows.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Map size above which stale windows are pruned on the next check
const PRUNE_THRESHOLD: usize = 1024;

/// Fixed-window rate limiter keyed by caller identity
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    /// Create a limiter allowing `max_requests` per caller per `window`
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request for the caller.
    ///
    /// Returns `false` when the caller has exhausted its budget for the
    /// current window; the rejected request still counts toward the window.
    pub fn check(&self, caller: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock();

        if windows.len() > PRUNE_THRESHOLD {
            windows.retain(|_, w| now.duration_since(w.started) < self.window);
        }

        let window = windows.entry(caller.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        window.count += 1;
        window.count <= self.max_requests
    }
}
