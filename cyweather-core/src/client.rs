use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, instrument};

use crate::{
    Config, WeatherError,
    model::{CurrentWeatherResponse, ForecastResponse, HealthStatus, WeatherQuery},
};

/// Read-only operations offered by the weather backend.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn current_weather(
        &self,
        query: &WeatherQuery,
    ) -> Result<CurrentWeatherResponse, WeatherError>;

    async fn forecast(&self, query: &WeatherQuery) -> Result<ForecastResponse, WeatherError>;

    async fn health(&self) -> Result<HealthStatus, WeatherError>;
}

/// HTTP client for the weather backend.
///
/// One GET per call, no retries, no caching. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    config: Config,
    http: Client,
}

impl WeatherClient {
    pub fn new(config: Config) -> Self {
        Self { config, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `GET {base}/weather/current?city=..[&country_code=..]`
    pub async fn fetch_current_weather(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<CurrentWeatherResponse, WeatherError> {
        let query = WeatherQuery::new(city, country_code.map(str::to_owned));
        self.current_weather(&query).await
    }

    /// `GET {base}/weather/forecast?city=..[&country_code=..]`
    pub async fn fetch_forecast(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<ForecastResponse, WeatherError> {
        let query = WeatherQuery::new(city, country_code.map(str::to_owned));
        self.forecast(&query).await
    }

    /// `GET {base}/health`
    pub async fn check_health(&self) -> Result<HealthStatus, WeatherError> {
        self.health().await
    }

    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &'static str,
    ) -> Result<T, WeatherError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(%url, ?query, "sending request");

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(WeatherError::from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { what, source })
    }
}

#[async_trait]
impl WeatherBackend for WeatherClient {
    #[instrument(skip(self), fields(city = %query.city))]
    async fn current_weather(
        &self,
        query: &WeatherQuery,
    ) -> Result<CurrentWeatherResponse, WeatherError> {
        self.get_json("weather/current", &query.query_pairs(), "current weather").await
    }

    #[instrument(skip(self), fields(city = %query.city))]
    async fn forecast(&self, query: &WeatherQuery) -> Result<ForecastResponse, WeatherError> {
        self.get_json("weather/forecast", &query.query_pairs(), "forecast").await
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthStatus, WeatherError> {
        self.get_json("health", &[], "health").await
    }
}
