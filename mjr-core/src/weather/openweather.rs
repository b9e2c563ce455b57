use super::{Coordinates, WeatherError, WeatherProvider, WeatherReport};
use crate::config::WeatherConfig;
use crate::entry::WeatherCondition;
use async_trait::async_trait;
use serde::Deserialize;

/// Client for the OpenWeatherMap "current weather" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    units: String,
}

#[derive(Deserialize)]
struct ApiResponse {
    main: ApiMain,
    weather: Vec<ApiWeather>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct ApiMain {
    temp: f64,
}

#[derive(Deserialize)]
struct ApiWeather {
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            units: config.units.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, coords: Coordinates) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", self.units.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_response(&body)
    }
}

/// Decodes `{main:{temp}, weather:[{main, description, icon}], name}`.
pub(crate) fn parse_response(body: &str) -> Result<WeatherReport, WeatherError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Decode(e.to_string()))?;
    let first = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Decode("no weather conditions in response".into()))?;
    Ok(WeatherReport {
        temp: response.main.temp,
        condition: WeatherCondition::from(first.main),
        description: first.description,
        icon: first.icon,
        location: response.name.filter(|n| !n.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_weather_payload() {
        let body = r#"{
            "coord": {"lon": -9.14, "lat": 38.72},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 17.4, "humidity": 80},
            "name": "Lisbon"
        }"#;
        let report = parse_response(body).unwrap();
        assert_eq!(report.temp, 17.4);
        assert_eq!(report.condition, WeatherCondition::Rain);
        assert_eq!(report.description, "light rain");
        assert_eq!(report.icon, "10d");
        assert_eq!(report.location.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn unknown_condition_is_kept_verbatim() {
        let body = r#"{"weather":[{"main":"Smoke"}],"main":{"temp":30}}"#;
        let report = parse_response(body).unwrap();
        assert_eq!(report.condition, WeatherCondition::Other("Smoke".into()));
        assert_eq!(report.location, None);
    }

    #[test]
    fn malformed_payloads_are_decode_errors() {
        assert!(matches!(
            parse_response(r#"{"weather":[],"main":{"temp":1}}"#),
            Err(WeatherError::Decode(_))
        ));
        assert!(matches!(parse_response("<html>"), Err(WeatherError::Decode(_))));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let config = WeatherConfig {
            api_key: Some("  ".into()),
            ..WeatherConfig::default()
        };
        let client = OpenWeatherClient::new(&config).unwrap();
        let coords = Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        };
        assert!(matches!(
            client.current(coords).await,
            Err(WeatherError::MissingApiKey)
        ));
    }
}
