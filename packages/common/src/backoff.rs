use rand::Rng;
use std::time::Duration;

/// Delay before retry number `attempt` (1-based).
///
/// Exponential in the attempt number with up to 25% random jitter so
/// concurrent callers do not hammer a recovering executor in lockstep,
/// capped at `max_ms`. Attempt 0 means no retry has happened yet and gets
/// no delay.
pub fn calculate_backoff(attempt: u8, base_ms: u64, max_ms: u64) -> Duration {
    let Some(exponent) = attempt.checked_sub(1) else {
        return Duration::ZERO;
    };

    let uncapped = base_ms.saturating_mul(2u64.saturating_pow(exponent.into()));
    let jittered = uncapped.saturating_add(rand::rng().random_range(0..=uncapped / 4));
    Duration::from_millis(jittered.min(max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let first = calculate_backoff(1, 500, 60_000).as_millis() as u64;
        assert!((500..=625).contains(&first), "{first}");

        let third = calculate_backoff(3, 500, 60_000).as_millis() as u64;
        assert!((2000..=2500).contains(&third), "{third}");
    }

    #[test]
    fn test_backoff_is_capped() {
        // Uncapped this would be 500 * 2^11 ms; the cap must win.
        let d = calculate_backoff(12, 500, 3_000);
        assert!(d <= Duration::from_millis(3_000));
    }

    #[test]
    fn test_no_delay_before_first_retry() {
        assert_eq!(calculate_backoff(0, 500, 3_000), Duration::ZERO);
    }
}
