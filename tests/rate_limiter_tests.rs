use std::time::Duration;

use careers_backend::limiter::rate_limiter::RateLimiterStore;
use tokio::time::advance;

// 3 attempts per 60s window, 1h block on exhaustion (production defaults).
fn store() -> RateLimiterStore {
    RateLimiterStore::new(3, Duration::from_secs(60), Duration::from_secs(3600))
}

#[tokio::test(start_paused = true)]
async fn allows_up_to_quota_within_window() {
    let limiter = store();

    for expected_remaining in [2, 1, 0] {
        let decision = limiter.consume("10.0.0.1");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, expected_remaining);
        assert_eq!(decision.retry_after, None);
    }
}

#[tokio::test(start_paused = true)]
async fn fourth_attempt_is_denied_and_blocks() {
    let limiter = store();

    for _ in 0..3 {
        assert!(limiter.consume("10.0.0.1").allowed);
    }

    let denied = limiter.consume("10.0.0.1");
    assert!(!denied.allowed);
    assert_eq!(denied.retry_after, Some(3600));
}

#[tokio::test(start_paused = true)]
async fn block_survives_window_resets() {
    let limiter = store();

    for _ in 0..4 {
        limiter.consume("10.0.0.1");
    }

    // Several windows pass, but the block period has not.
    advance(Duration::from_secs(61)).await;
    assert!(!limiter.consume("10.0.0.1").allowed);

    advance(Duration::from_secs(600)).await;
    assert!(!limiter.consume("10.0.0.1").allowed);
}

#[tokio::test(start_paused = true)]
async fn key_is_released_after_block_period() {
    let limiter = store();

    for _ in 0..4 {
        limiter.consume("10.0.0.1");
    }

    advance(Duration::from_secs(3601)).await;

    let decision = limiter.consume("10.0.0.1");
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 2);
}

#[tokio::test(start_paused = true)]
async fn window_reset_refills_an_unblocked_key() {
    let limiter = store();

    // Quota fully used but never exceeded: no block.
    for _ in 0..3 {
        assert!(limiter.consume("10.0.0.1").allowed);
    }

    advance(Duration::from_secs(61)).await;

    let decision = limiter.consume("10.0.0.1");
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 2);
}

#[tokio::test(start_paused = true)]
async fn keys_are_tracked_independently() {
    let limiter = store();

    for _ in 0..4 {
        limiter.consume("10.0.0.1");
    }

    assert!(!limiter.consume("10.0.0.1").allowed);
    assert!(limiter.consume("10.0.0.2").allowed);
}
