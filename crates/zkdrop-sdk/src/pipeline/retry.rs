//! Retry of external pipeline steps with exponential backoff.

use std::time::Duration;

use tracing::warn;

use super::config::ValidatedPipelineConfig;
use super::error::PipelineError;

/// Calculates the delay for exponential backoff.
///
/// delay = `base_delay` × (`backoff_factor` ^ `attempt`)
fn calculate_backoff_delay(
    attempt: u32,
    base_delay: Duration,
    max_delay: Duration,
    backoff_factor: u32,
) -> Duration {
    let delay = base_delay
        .checked_mul(backoff_factor.saturating_pow(attempt))
        .unwrap_or(max_delay);

    delay.min(max_delay)
}

/// Retries an async pipeline step with exponential backoff.
///
/// Only errors for which [`PipelineError::is_retryable`] holds are retried; everything else is
/// returned immediately.
pub(crate) async fn retry_with_backoff<F, Fut, T>(
    config: &ValidatedPipelineConfig,
    mut operation: F,
) -> Result<T, PipelineError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PipelineError>>,
{
    let mut attempt = 0_u32;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) if attempt < config.max_retry_attempts && error.is_retryable() => {
                let delay = calculate_backoff_delay(
                    attempt,
                    config.initial_retry_delay,
                    config.max_retry_delay,
                    config.backoff_factor,
                );
                warn!(%error, attempt, ?delay, "Retrying pipeline step");
                tokio::time::sleep(delay).await;
                attempt = attempt.saturating_add(1);
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::arithmetic_side_effects, reason = "Tests")]

    use super::*;
    use crate::pipeline::PipelineConfig;

    fn test_config(max_retry_attempts: u32) -> ValidatedPipelineConfig {
        PipelineConfig {
            max_retry_attempts,
            initial_retry_delay: Duration::from_millis(1),
            max_retry_delay: Duration::from_millis(10),
            backoff_factor: 2,
        }
        .validate()
        .expect("valid test config")
    }

    #[test]
    fn backoff_grows_and_caps() {
        let initial = Duration::from_millis(100);
        let max = Duration::from_secs(1);

        assert_eq!(calculate_backoff_delay(0, initial, max, 2), initial);
        assert_eq!(
            calculate_backoff_delay(3, initial, max, 2),
            Duration::from_millis(800)
        );
        assert_eq!(calculate_backoff_delay(4, initial, max, 2), max);
        assert_eq!(calculate_backoff_delay(u32::MAX, initial, max, 2), max);
        assert_eq!(
            calculate_backoff_delay(5, Duration::ZERO, max, 2),
            Duration::ZERO
        );
    }

    #[tokio::test]
    async fn retries_terminated_steps_until_success() {
        let config = test_config(3);
        let mut call_count = 0_u32;

        let result = retry_with_backoff(&config, || {
            let count = call_count;
            call_count += 1;
            async move {
                if count < 2 {
                    Err(PipelineError::Terminated { step: "proof" })
                } else {
                    Ok(count)
                }
            }
        })
        .await;

        assert_eq!(result.expect("third attempt succeeds"), 2);
        assert_eq!(call_count, 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let config = test_config(2);
        let mut call_count = 0_u32;

        let result: Result<(), _> = retry_with_backoff(&config, || {
            call_count += 1;
            async { Err(PipelineError::Terminated { step: "witness" }) }
        })
        .await;

        assert!(matches!(result, Err(PipelineError::Terminated { .. })));
        assert_eq!(call_count, 3);
    }

    #[tokio::test]
    async fn does_not_retry_step_failures() {
        let config = test_config(3);
        let mut call_count = 0_u32;

        let result: Result<(), _> = retry_with_backoff(&config, || {
            call_count += 1;
            async { Err(PipelineError::Witness("assert failed".to_owned())) }
        })
        .await;

        assert!(matches!(result, Err(PipelineError::Witness(_))));
        assert_eq!(call_count, 1);
    }
}
