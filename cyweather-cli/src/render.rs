//! Human-friendly output formatting.

use cyweather_core::{CurrentWeatherResponse, DailyForecastEntry, ForecastResponse};

pub fn current(res: &CurrentWeatherResponse) -> String {
    let w = &res.weather;
    let observed = match res.observed_at() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => res.timestamp.clone(),
    };

    [
        format!("{}, {} ({observed})", res.city, res.country),
        format!("  {} [{}]", w.description, w.icon),
        format!("  Temperature: {:.1}°C (feels like {:.1}°C)", w.temperature, w.feels_like),
        format!("  Humidity:    {}%", w.humidity_percent()),
        format!("  Pressure:    {:.0} hPa", w.pressure),
        format!("  Wind:        {:.1} m/s", w.wind_speed),
    ]
    .join("\n")
}

pub fn forecast(res: &ForecastResponse) -> String {
    let mut out = format!("{}, {}", res.city, res.country);

    if res.forecast.is_empty() {
        out.push_str("\n  No forecast available.");
        return out;
    }

    for day in &res.forecast {
        out.push('\n');
        out.push_str(&forecast_day(day));
    }

    out
}

fn forecast_day(day: &DailyForecastEntry) -> String {
    let rain = day
        .precipitation_probability
        .map(|p| format!("{p:.0}%"))
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "  {}  {:>5.1}°C / {:>5.1}°C (day {:.1}°C, night {:.1}°C)  \
         humidity {:>3}%  wind {:>4.1} m/s  rain {:>4}  {} [{}]",
        day.date.format("%a %Y-%m-%d"),
        day.temp_min,
        day.temp_max,
        day.temp_day,
        day.temp_night,
        day.humidity_percent(),
        day.wind_speed,
        rain,
        day.description,
        day.icon,
    )
}
