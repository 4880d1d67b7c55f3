//! Core library for the `cyweather` CLI.
//!
//! This crate defines:
//! - Configuration (backend base URL)
//! - A typed HTTP client for the CY Weather backend
//! - The response models returned by `/weather/current` and `/weather/forecast`
//!
//! It is used by `cyweather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{WeatherBackend, WeatherClient};
pub use config::{Config, DEFAULT_BASE_URL};
pub use error::{NETWORK_ERROR_FALLBACK, WeatherError};
pub use model::{
    CurrentWeatherResponse, CurrentWeatherSnapshot, DailyForecastEntry, ForecastResponse,
    HealthStatus, WeatherQuery,
};
