use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::HttpRequest;
use chrono::Utc;

/// Decision for a single request against a keyed window
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Unix epoch milliseconds at which the window resets.
    pub reset_ms: i64,
}

#[derive(Debug)]
struct WindowState {
    count: u32,
    reset_ms: i64,
}

/// Fixed-window in-memory rate limiter
///
/// Single-process scope: counters live in this instance only. Each key is
/// tracked with a rolling window and request counter; expired windows are
/// replaced on the next request for the same key.
pub struct RateLimiter {
    limit: u32,
    window_ms: i64,
    store: Mutex<HashMap<String, WindowState>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window_ms: window.as_millis() as i64,
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request against `key` and report the window state.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = Utc::now().timestamp_millis();
        let mut store = self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        match store.get_mut(key) {
            Some(state) if state.reset_ms > now => {
                if state.count >= self.limit {
                    return RateLimitDecision {
                        allowed: false,
                        limit: self.limit,
                        remaining: 0,
                        reset_ms: state.reset_ms,
                    };
                }

                state.count += 1;
                RateLimitDecision {
                    allowed: true,
                    limit: self.limit,
                    remaining: self.limit - state.count,
                    reset_ms: state.reset_ms,
                }
            }
            _ => {
                let reset_ms = now + self.window_ms;
                store.insert(
                    key.to_string(),
                    WindowState {
                        count: 1,
                        reset_ms,
                    },
                );
                RateLimitDecision {
                    allowed: true,
                    limit: self.limit,
                    remaining: self.limit.saturating_sub(1),
                    reset_ms,
                }
            }
        }
    }
}

/// Best-effort client identifier for rate limiting.
///
/// Prefers proxy headers, then the peer address.
pub fn identify_request(req: &HttpRequest) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let trimmed = first.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    if let Some(real_ip) = req
        .headers()
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
    {
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
