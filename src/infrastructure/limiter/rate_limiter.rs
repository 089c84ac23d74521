use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::{sleep, Instant};

/// Per-key attempt window. `blocked_until` survives window resets: once a key
/// exhausts its quota it stays denied for the whole block period.
#[derive(Debug)]
struct AttemptWindow {
    window_start: Instant,
    count: u32,
    blocked_until: Option<Instant>,
    last_seen: Instant,
}

impl AttemptWindow {
    fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            count: 0,
            blocked_until: None,
            last_seen: now,
        }
    }
}

/// Outcome of a single consume call.
#[derive(Debug, Clone, Copy)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub retry_after: Option<u64>,
}

/// Fixed-window rate limiter with an extended block period on exhaustion.
/// Quota of `points` attempts per `window`; the attempt that exceeds the
/// quota blocks the key for `block` regardless of later window resets.
///
/// The consume path is a single read-modify-write under the per-key mutex,
/// so concurrent requests from one key cannot both take the last slot.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<String, Arc<Mutex<AttemptWindow>>>>,
    points: u32,
    window: Duration,
    block: Duration,
    entry_ttl: Duration,
}

impl RateLimiterStore {
    pub fn new(points: u32, window: Duration, block: Duration) -> Self {
        let store = Self {
            map: Arc::new(DashMap::new()),
            points,
            window,
            block,
            // Idle entries outlive the block so an active block is never lost.
            entry_ttl: block + window,
        };

        // spawn eviction task
        {
            let map_clone = store.map.clone();
            let ttl = store.entry_ttl;
            tokio::spawn(async move {
                let interval = Duration::from_secs(30);
                loop {
                    sleep(interval).await;
                    let now = Instant::now();
                    let keys_to_remove: Vec<String> = map_clone
                        .iter()
                        .filter_map(|entry| {
                            let w = entry.value().lock();
                            let block_active =
                                w.blocked_until.is_some_and(|until| now < until);
                            if !block_active && now.duration_since(w.last_seen) > ttl {
                                Some(entry.key().clone())
                            } else {
                                None
                            }
                        })
                        .collect();

                    for k in keys_to_remove {
                        map_clone.remove(&k);
                    }
                }
            });
        }

        store
    }

    fn get_window(&self, key: &str) -> Arc<Mutex<AttemptWindow>> {
        if let Some(existing) = self.map.get(key) {
            existing.clone()
        } else {
            let window = Arc::new(Mutex::new(AttemptWindow::new(Instant::now())));
            match self.map.entry(key.to_string()) {
                dashmap::mapref::entry::Entry::Occupied(entry) => entry.get().clone(),
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    entry.insert(window.clone());
                    window
                }
            }
        }
    }

    pub fn consume(&self, key: &str) -> RateDecision {
        let window = self.get_window(key);
        let mut w = window.lock();
        let now = Instant::now();
        w.last_seen = now;

        if let Some(until) = w.blocked_until {
            if now < until {
                return RateDecision {
                    allowed: false,
                    remaining: 0,
                    retry_after: Some(secs_until(now, until)),
                };
            }
            // Block expired: the key starts over with a fresh window.
            w.blocked_until = None;
            w.window_start = now;
            w.count = 0;
        }

        if now.duration_since(w.window_start) >= self.window {
            w.window_start = now;
            w.count = 0;
        }

        w.count += 1;
        if w.count > self.points {
            let until = now + self.block;
            w.blocked_until = Some(until);
            return RateDecision {
                allowed: false,
                remaining: 0,
                retry_after: Some(secs_until(now, until)),
            };
        }

        RateDecision {
            allowed: true,
            remaining: self.points - w.count,
            retry_after: None,
        }
    }
}

fn secs_until(now: Instant, until: Instant) -> u64 {
    let secs = until.duration_since(now).as_secs_f64().ceil() as u64;
    secs.max(1)
}
