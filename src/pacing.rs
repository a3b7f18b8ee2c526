//! Randomized waits used to pace demo traffic

use crate::error::{FraudUtilsError, Result};
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Draw a duration uniformly from `[min_seconds, max_seconds]` in steps of
/// one hundredth of a second. Bounds too large for a millisecond count
/// saturate at `u64::MAX` milliseconds.
pub fn random_wait_duration<R: Rng + ?Sized>(
    rng: &mut R,
    min_seconds: f64,
    max_seconds: f64,
) -> Result<Duration> {
    if !min_seconds.is_finite()
        || !max_seconds.is_finite()
        || min_seconds < 0.0
        || min_seconds > max_seconds
    {
        return Err(FraudUtilsError::InvalidWaitRange {
            min: min_seconds,
            max: max_seconds,
        });
    }

    let low = (min_seconds * 100.0).round() as u64;
    let high = (max_seconds * 100.0).round() as u64;
    let hundredths = rng.gen_range(low..=high);
    Ok(Duration::from_millis(hundredths.saturating_mul(10)))
}

/// Block the calling thread for a random duration drawn from `rng`
pub fn wait_random_time_with<R: Rng + ?Sized>(
    rng: &mut R,
    min_seconds: f64,
    max_seconds: f64,
) -> Result<Duration> {
    let wait = random_wait_duration(rng, min_seconds, max_seconds)?;
    debug!(wait_ms = wait.as_millis() as u64, "Pacing wait");
    thread::sleep(wait);
    Ok(wait)
}

/// Block the calling thread for a random duration in `[min_seconds, max_seconds]`
pub fn wait_random_time(min_seconds: f64, max_seconds: f64) -> Result<Duration> {
    wait_random_time_with(&mut rand::thread_rng(), min_seconds, max_seconds)
}
