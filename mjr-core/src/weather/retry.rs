use super::{Coordinates, LocationProvider, WeatherError, WeatherProvider, WeatherReport};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Wait after the first failure. Doubles after each further failure.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            initial_delay: Duration::from_secs(1),
        }
    }
}

/// Asks `provider` for the current weather, retrying transient failures with
/// exponential backoff. Cancelling `cancel` aborts both an in-flight request
/// and a pending wait.
pub async fn fetch_with_retry<P>(
    provider: &P,
    coords: Coordinates,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<WeatherReport, WeatherError>
where
    P: WeatherProvider + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 0;

    loop {
        attempt += 1;
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WeatherError::Cancelled),
            result = provider.current(coords) => result,
        };

        let error = match result {
            Ok(report) => {
                debug!(attempt, "weather fetched");
                return Ok(report);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) if attempt >= max_attempts => {
                return Err(WeatherError::Exhausted {
                    attempts: attempt,
                    last: Box::new(e),
                });
            }
            Err(e) => e,
        };

        warn!(attempt, max_attempts, ?delay, "weather fetch failed, retrying: {error}");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WeatherError::Cancelled),
            _ = tokio::time::sleep(delay) => {}
        }
        delay = delay.saturating_mul(2);
    }
}

/// Outcome of a weather lookup as the UI sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherState {
    Ready(WeatherReport),
    Failed(String),
    Cancelled,
}

/// Locates the user, then fetches the weather there.
pub struct WeatherService<P, L> {
    provider: P,
    location: L,
    policy: RetryPolicy,
}

impl<P: WeatherProvider, L: LocationProvider> WeatherService<P, L> {
    pub fn new(provider: P, location: L, policy: RetryPolicy) -> Self {
        Self {
            provider,
            location,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn fetch(&self, cancel: &CancellationToken) -> Result<WeatherReport, WeatherError> {
        let coords = self.location.locate()?;
        fetch_with_retry(&self.provider, coords, &self.policy, cancel).await
    }

    pub async fn current(&self, cancel: &CancellationToken) -> WeatherState {
        match self.fetch(cancel).await {
            Ok(report) => WeatherState::Ready(report),
            Err(WeatherError::Cancelled) => WeatherState::Cancelled,
            Err(e) => WeatherState::Failed(e.to_string()),
        }
    }
}
