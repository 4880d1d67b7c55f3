use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for the weather endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
    pub country_code: Option<String>,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, country_code: Option<String>) -> Self {
        Self { city: city.into(), country_code }
    }

    /// Query pairs in wire order: `city` first, then `country_code` when present.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("city", self.city.as_str())];
        if let Some(code) = self.country_code.as_deref() {
            pairs.push(("country_code", code));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherSnapshot {
    pub temperature: f64,
    pub feels_like: f64,
    /// Percent, as sent by the backend (may be fractional).
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub city: String,
    pub country: String,
    /// ISO-8601 timestamp as sent by the backend.
    pub timestamp: String,
    pub weather: CurrentWeatherSnapshot,
}

impl CurrentWeatherSnapshot {
    pub fn humidity_percent(&self) -> u8 {
        humidity_percent(self.humidity)
    }
}

impl CurrentWeatherResponse {
    /// Parse `timestamp` into a UTC instant.
    ///
    /// Accepts RFC 3339 and offset-less timestamps (taken as UTC). Returns
    /// `None` when the backend sent something else.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .ok()
            .map(|ndt| ndt.and_utc())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_day: f64,
    pub temp_night: f64,
    /// Daily average, percent.
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    /// Percent. `None` when the backend has no estimate, which is not the same as 0.
    #[serde(default)]
    pub precipitation_probability: Option<f64>,
}

impl DailyForecastEntry {
    pub fn humidity_percent(&self) -> u8 {
        humidity_percent(self.humidity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub city: String,
    pub country: String,
    /// Chronological, as ordered by the backend.
    pub forecast: Vec<DailyForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Humidity rounded to a whole percent, clamped to `0..=100`.
pub fn humidity_percent(humidity: f64) -> u8 {
    if humidity.is_nan() {
        return 0;
    }
    humidity.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use serde_json::json;

    fn entry_json() -> serde_json::Value {
        json!({
            "date": "2026-01-13",
            "temp_min": 2.5,
            "temp_max": 9.0,
            "temp_day": 7.5,
            "temp_night": 3.0,
            "humidity": 81.0,
            "wind_speed": 4.2,
            "description": "light rain",
            "icon": "10d",
            "precipitation_probability": 65.0
        })
    }

    #[test]
    fn query_pairs_without_country() {
        let q = WeatherQuery::new("Paris", None);
        assert_eq!(q.query_pairs(), vec![("city", "Paris")]);
    }

    #[test]
    fn query_pairs_keep_city_first() {
        let q = WeatherQuery::new("Paris", Some("FR".into()));
        assert_eq!(q.query_pairs(), vec![("city", "Paris"), ("country_code", "FR")]);
    }

    #[test]
    fn empty_country_code_is_still_sent() {
        let q = WeatherQuery::new("Paris", Some(String::new()));
        assert_eq!(q.query_pairs(), vec![("city", "Paris"), ("country_code", "")]);
    }

    #[test]
    fn forecast_entry_parses_date() {
        let entry: DailyForecastEntry = serde_json::from_value(entry_json()).unwrap();
        assert_eq!(entry.date.year(), 2026);
        assert_eq!(entry.date.day(), 13);
        assert_eq!(entry.precipitation_probability, Some(65.0));
    }

    #[test]
    fn missing_or_null_precipitation_is_none() {
        let mut value = entry_json();
        value["precipitation_probability"] = serde_json::Value::Null;
        let entry: DailyForecastEntry = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(entry.precipitation_probability, None);

        value.as_object_mut().unwrap().remove("precipitation_probability");
        let entry: DailyForecastEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.precipitation_probability, None);
    }

    #[test]
    fn fractional_humidity_is_kept() {
        let mut value = entry_json();
        value["humidity"] = json!(72.5);
        let entry: DailyForecastEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.humidity, 72.5);
        assert_eq!(entry.humidity_percent(), 73);
    }

    #[test]
    fn float_humidity_serializes_back_unchanged() {
        let body = json!({
            "city": "Paris",
            "country": "FR",
            "timestamp": "2026-01-13T10:00:00",
            "weather": {
                "temperature": 12.3,
                "feels_like": 11.5,
                "humidity": 70.0,
                "pressure": 1012.0,
                "wind_speed": 4.1,
                "description": "overcast clouds",
                "icon": "04d"
            }
        });

        let parsed: CurrentWeatherResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), body);
    }

    #[test]
    fn humidity_percent_rounds_and_clamps() {
        assert_eq!(humidity_percent(0.4), 0);
        assert_eq!(humidity_percent(99.6), 100);
        assert_eq!(humidity_percent(140.0), 100);
        assert_eq!(humidity_percent(-3.0), 0);
        assert_eq!(humidity_percent(f64::NAN), 0);
    }

    #[test]
    fn shape_mismatch_fails_loudly() {
        let mut value = entry_json();
        value["temp_min"] = json!("cold");
        assert!(serde_json::from_value::<DailyForecastEntry>(value).is_err());
    }

    fn current_with_timestamp(ts: &str) -> CurrentWeatherResponse {
        CurrentWeatherResponse {
            city: "Paris".into(),
            country: "FR".into(),
            timestamp: ts.into(),
            weather: CurrentWeatherSnapshot {
                temperature: 12.3,
                feels_like: 11.0,
                humidity: 70.0,
                pressure: 1012.0,
                wind_speed: 4.0,
                description: "overcast".into(),
                icon: "04d".into(),
            },
        }
    }

    #[test]
    fn observed_at_handles_naive_and_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 13, 10, 0, 0).unwrap();

        assert_eq!(current_with_timestamp("2026-01-13T10:00:00").observed_at(), Some(expected));
        assert_eq!(current_with_timestamp("2026-01-13T10:00:00Z").observed_at(), Some(expected));
        assert_eq!(
            current_with_timestamp("2026-01-13T11:00:00+01:00").observed_at(),
            Some(expected)
        );
        assert_eq!(
            current_with_timestamp("2026-01-13T10:00:00.000000").observed_at(),
            Some(expected)
        );
    }

    #[test]
    fn observed_at_is_none_for_garbage() {
        assert_eq!(current_with_timestamp("yesterday").observed_at(), None);
    }

    #[test]
    fn health_status_ok() {
        let h: HealthStatus = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(h.is_ok());
        assert!(!HealthStatus { status: "degraded".into() }.is_ok());
    }
}
