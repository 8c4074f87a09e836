use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::city::CityQuery;
use crate::config::Config;
use crate::error::WeatherError;
use crate::model::WeatherReport;
use crate::parse::{parse_current, parse_forecast};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the two OpenWeatherMap endpoints.
///
/// Stateless between lookups; each fetch is a single attempt with a fixed
/// timeout and no retries.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    current_weather_url: String,
    forecast_url: String,
    api_key: String,
    http: Client,
}

impl WeatherClient {
    /// Build a client from configuration.
    ///
    /// Fails with [`WeatherError::MissingApiKey`] when no key is configured,
    /// before any request can be issued.
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        let api_key = config.api_key().ok_or(WeatherError::MissingApiKey)?.to_string();

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WeatherError::Connectivity)?;

        Ok(Self {
            current_weather_url: config.current_weather_url,
            forecast_url: config.forecast_url,
            api_key,
            http,
        })
    }

    /// Fetch current conditions as raw JSON.
    pub async fn fetch_current(&self, city: &CityQuery) -> Result<Value, WeatherError> {
        self.get_json(&self.current_weather_url, city).await
    }

    /// Fetch the 5-day/3-hour forecast as raw JSON.
    pub async fn fetch_forecast(&self, city: &CityQuery) -> Result<Value, WeatherError> {
        self.get_json(&self.forecast_url, city).await
    }

    /// The whole lookup: current conditions plus the aggregated daily
    /// forecast. Requests run serially, current first.
    pub async fn lookup(&self, city: &CityQuery) -> Result<WeatherReport, WeatherError> {
        let current = parse_current(&self.fetch_current(city).await?)?;
        let forecast = parse_forecast(&self.fetch_forecast(city).await?)?;

        Ok(WeatherReport { current, forecast })
    }

    async fn get_json(&self, url: &str, city: &CityQuery) -> Result<Value, WeatherError> {
        tracing::debug!(%city, url, "requesting weather data");

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(WeatherError::Connectivity)?;

        match res.status() {
            StatusCode::OK => res
                .json::<Value>()
                .await
                .map_err(|e| WeatherError::malformed(e.to_string())),
            StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => Err(WeatherError::InvalidApiKey),
            status => {
                tracing::warn!(%status, url, "unexpected response status");
                Err(WeatherError::Upstream(status.as_u16()))
            }
        }
    }
}
