use crate::{LoginRateLimiter, RateLimitConfig};

#[test]
fn given_limiter_when_under_limit_then_allows_attempts() {
    let config = RateLimitConfig {
        max_requests: 10,
        window_secs: 1,
    };
    let limiter = LoginRateLimiter::new(config);

    for _ in 0..5 {
        assert!(limiter.check("a@b.test").is_ok());
    }
}

#[test]
fn given_limiter_when_burst_exceeds_limit_then_rejects() {
    let config = RateLimitConfig {
        max_requests: 2,
        window_secs: 1,
    };
    let limiter = LoginRateLimiter::new(config);

    let mut hit_limit = false;
    for _ in 0..10 {
        if limiter.check("a@b.test").is_err() {
            hit_limit = true;
            break;
        }
    }
    assert!(hit_limit, "Expected rate limit to be enforced");
}

#[test]
fn given_limiter_when_one_key_exhausted_then_other_keys_unaffected() {
    let config = RateLimitConfig {
        max_requests: 2,
        window_secs: 60,
    };
    let limiter = LoginRateLimiter::new(config);

    for _ in 0..10 {
        let _ = limiter.check("hammered@b.test");
    }
    assert!(limiter.check("hammered@b.test").is_err());

    assert!(limiter.check("quiet@b.test").is_ok());
}
