//! Broadcast retry delays: exponential with jitter.

use rand::Rng;
use std::time::Duration;

/// Delay before broadcast attempt `attempt + 1`, given `attempt` failures so far.
pub fn retry_delay(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let delay_ms = base_ms.saturating_mul(2u64.saturating_pow(attempt - 1));
    let capped = delay_ms.min(max_ms);

    // up to 10% jitter so concurrent faucets do not retry in lockstep
    let jitter_range = capped / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attempt_has_no_delay() {
        assert_eq!(retry_delay(0, 500, 10_000), Duration::ZERO);
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let d1 = retry_delay(1, 100, 2000);
        assert!(d1.as_millis() >= 100 && d1.as_millis() < 110);

        let d3 = retry_delay(3, 100, 2000);
        assert!(d3.as_millis() >= 400 && d3.as_millis() < 440);

        let capped = retry_delay(20, 100, 1000);
        assert!(capped.as_millis() >= 1000 && capped.as_millis() < 1100);
    }
}
