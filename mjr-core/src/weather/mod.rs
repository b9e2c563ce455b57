//! Current-weather lookup: location, provider, and a bounded retry loop.

mod location;
mod openweather;
mod retry;

pub use location::{ConfiguredLocation, LocationError, LocationProvider};
pub use openweather::OpenWeatherClient;
pub use retry::{RetryPolicy, WeatherService, WeatherState, fetch_with_retry};

use crate::entry::{WeatherCondition, WeatherSnapshot};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What the provider said about the current conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub temp: f64,
    pub condition: WeatherCondition,
    pub description: String,
    pub icon: String,
    pub location: Option<String>,
}

impl WeatherReport {
    /// The part of the report stored with an entry, temperature in whole degrees.
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temp: self.temp.round(),
            condition: self.condition.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("no weather API key configured")]
    MissingApiKey,
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("weather service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected weather response: {0}")]
    Decode(String),
    #[error("weather lookup gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<WeatherError>,
    },
    #[error("weather lookup cancelled")]
    Cancelled,
}

impl WeatherError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            WeatherError::Http(_) | WeatherError::Decode(_) => true,
            WeatherError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, coords: Coordinates) -> Result<WeatherReport, WeatherError>;
}
