//! OpenWeatherMap client.

use super::http_utils::{create_http_client, extract_str, get_json};
use super::{ServiceError, WeatherProvider, WeatherReport};
use reqwest::Client as HttpClient;
use serde_json::Value;

const OPEN_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current-weather lookups in metric units
pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    /// Create a client against the public API
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(OPEN_WEATHER_URL, api_key)
    }

    /// Create a client against a custom endpoint
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client: create_http_client(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<Option<WeatherReport>, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingConfig("WEATHER_API_KEY".to_string()))?;

        let query = [("q", city), ("appid", api_key), ("units", "metric")];
        match get_json(&self.http_client, &self.base_url, &query).await {
            Ok(body) => parse_weather(&body),
            Err(ServiceError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Parse a current-weather payload. `cod` is a number on success and a
/// string such as `"404"` on failure.
pub(crate) fn parse_weather(body: &Value) -> Result<Option<WeatherReport>, ServiceError> {
    let cod = match body.get("cod") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse::<i64>().ok(),
        _ => None,
    };
    if cod != Some(200) {
        return Ok(None);
    }

    let description = extract_str(body, &["weather", "0", "description"])?;
    let temperature = body
        .pointer("/main/temp")
        .and_then(Value::as_f64)
        .ok_or_else(|| ServiceError::Json("missing main.temp".to_string()))?;

    Ok(Some(WeatherReport {
        description,
        temperature,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_weather_success() -> Result<(), ServiceError> {
        let body = json!({
            "cod": 200,
            "weather": [{"main": "Rain", "description": "light rain"}],
            "main": {"temp": 11.3, "humidity": 80}
        });
        let report = parse_weather(&body)?;
        assert_eq!(
            report,
            Some(WeatherReport {
                description: "light rain".to_string(),
                temperature: 11.3,
            })
        );
        Ok(())
    }

    #[test]
    fn test_parse_weather_not_found_string_code() -> Result<(), ServiceError> {
        let body = json!({"cod": "404", "message": "city not found"});
        assert_eq!(parse_weather(&body)?, None);
        Ok(())
    }

    #[test]
    fn test_parse_weather_malformed_success() {
        let body = json!({"cod": 200, "weather": []});
        assert!(parse_weather(&body).is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = OpenWeatherClient::new(None);
        let res = client.current_weather("London").await;
        assert!(matches!(res, Err(ServiceError::MissingConfig(_))));
    }
}
