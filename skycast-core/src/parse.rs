//! Transformation of raw OpenWeatherMap payloads into display records.
//!
//! Both entry points take the fetched `serde_json::Value` as-is, so they can
//! be exercised with literal fixtures. Any missing field, empty `weather`
//! array, or unreadable timestamp surfaces as
//! [`WeatherError::MalformedResponse`].

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::WeatherError;
use crate::model::{CurrentWeather, DailyForecast};

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct ConditionTag {
    description: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: CurrentMain,
    weather: Vec<ConditionTag>,
    wind: CurrentWind,
}

#[derive(Debug, Deserialize)]
struct IntervalMain {
    temp: f64,
}

/// One 3-hour forecast record.
#[derive(Debug, Deserialize)]
struct IntervalSample {
    /// "YYYY-MM-DD HH:MM:SS"
    dt_txt: String,
    main: IntervalMain,
    weather: Vec<ConditionTag>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<IntervalSample>,
}

/// All interval samples sharing a calendar date, in encounter order.
#[derive(Debug, Default)]
struct DayBucket {
    temps: Vec<f64>,
    conditions: Vec<String>,
}

/// Parse a current-weather payload into its display record.
pub fn parse_current(data: &Value) -> Result<CurrentWeather, WeatherError> {
    let parsed: CurrentResponse =
        serde_json::from_value(data.clone()).map_err(|e| WeatherError::malformed(e.to_string()))?;

    let condition = parsed
        .weather
        .first()
        .ok_or_else(|| WeatherError::malformed("weather list is empty"))?;

    Ok(CurrentWeather {
        temperature: format!("{:.1} °C", parsed.main.temp),
        condition: title_case(&condition.description),
        humidity: format!("{}%", parsed.main.humidity),
        wind_speed: format!("{} m/s", parsed.wind.speed),
    })
}

/// Aggregate the 3-hour forecast intervals into one record per calendar day,
/// ascending by date. An empty interval list yields an empty vec.
pub fn parse_forecast(data: &Value) -> Result<Vec<DailyForecast>, WeatherError> {
    let parsed: ForecastResponse =
        serde_json::from_value(data.clone()).map_err(|e| WeatherError::malformed(e.to_string()))?;

    // Keyed by the ISO date half of `dt_txt`; lexicographic key order is
    // chronological, so BTreeMap iteration already sorts the output.
    let mut days: BTreeMap<String, DayBucket> = BTreeMap::new();
    for sample in &parsed.list {
        let (date, _) = sample.dt_txt.split_once(' ').ok_or_else(|| {
            WeatherError::malformed(format!("unexpected dt_txt: {}", sample.dt_txt))
        })?;
        let condition = sample
            .weather
            .first()
            .ok_or_else(|| WeatherError::malformed("weather list is empty"))?;

        let bucket = days.entry(date.to_string()).or_default();
        bucket.temps.push(sample.main.temp);
        bucket.conditions.push(condition.description.clone());
    }

    days.into_iter()
        .map(|(date, bucket)| {
            let max = bucket.temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = bucket.temps.iter().copied().fold(f64::INFINITY, f64::min);
            let condition = most_common(&bucket.conditions)
                .ok_or_else(|| WeatherError::malformed("empty forecast bucket"))?;

            Ok(DailyForecast {
                date: day_label(&date)?,
                max_temp: format!("{max:.1} °C"),
                min_temp: format!("{min:.1} °C"),
                condition: title_case(condition),
            })
        })
        .collect()
}

/// "2026-02-07" -> "Sat, Feb 07".
fn day_label(date: &str) -> Result<String, WeatherError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| WeatherError::malformed(format!("unexpected forecast date: {date}")))?;
    Ok(parsed.format("%a, %b %d").to_string())
}

/// Most frequent value; ties go to the value encountered first.
fn most_common(values: &[String]) -> Option<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for value in values {
        let count = counts[value.as_str()];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}

/// Capitalize the first letter of each word: "clear sky" -> "Clear Sky".
fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn interval(dt_txt: &str, temp: f64, description: &str) -> Value {
        json!({
            "dt_txt": dt_txt,
            "main": { "temp": temp },
            "weather": [{ "description": description }],
        })
    }

    #[test]
    fn current_payload_becomes_display_record() {
        let data = json!({
            "main": { "temp": 20.5, "humidity": 65 },
            "weather": [{ "description": "clear sky" }],
            "wind": { "speed": 3.2 },
        });

        let current = parse_current(&data).expect("valid payload");
        assert_eq!(current.temperature, "20.5 °C");
        assert_eq!(current.condition, "Clear Sky");
        assert_eq!(current.humidity, "65%");
        assert_eq!(current.wind_speed, "3.2 m/s");
    }

    #[test]
    fn negative_temperature_keeps_its_sign() {
        let data = json!({
            "main": { "temp": -5.0, "humidity": 80 },
            "weather": [{ "description": "snow" }],
            "wind": { "speed": 1.0 },
        });

        let current = parse_current(&data).expect("valid payload");
        assert_eq!(current.temperature, "-5.0 °C");
        assert_eq!(current.condition, "Snow");
    }

    #[test]
    fn missing_main_is_malformed() {
        let data = json!({
            "weather": [{ "description": "clear sky" }],
            "wind": { "speed": 3.2 },
        });

        let err = parse_current(&data).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn empty_weather_list_is_malformed() {
        let data = json!({
            "main": { "temp": 20.5, "humidity": 65 },
            "weather": [],
            "wind": { "speed": 3.2 },
        });

        let err = parse_current(&data).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn parsing_is_idempotent() {
        let data = json!({
            "main": { "temp": 20.5, "humidity": 65 },
            "weather": [{ "description": "clear sky" }],
            "wind": { "speed": 3.2 },
        });

        let first = parse_current(&data).expect("valid payload");
        let second = parse_current(&data).expect("valid payload");
        assert_eq!(first, second);
    }

    #[test]
    fn same_day_intervals_collapse_into_one_entry() {
        let data = json!({
            "list": [
                interval("2026-02-07 12:00:00", 10.0, "clouds"),
                interval("2026-02-07 15:00:00", 12.0, "clouds"),
            ],
        });

        let forecast = parse_forecast(&data).expect("valid payload");
        assert_eq!(forecast.len(), 1);
        assert_eq!(forecast[0].date, "Sat, Feb 07");
        assert_eq!(forecast[0].max_temp, "12.0 °C");
        assert_eq!(forecast[0].min_temp, "10.0 °C");
        assert_eq!(forecast[0].condition, "Clouds");
    }

    #[test]
    fn distinct_days_come_out_in_date_order() {
        // Deliberately out of order in the payload.
        let data = json!({
            "list": [
                interval("2026-02-08 12:00:00", 15.0, "clear sky"),
                interval("2026-02-07 12:00:00", 10.0, "rain"),
            ],
        });

        let forecast = parse_forecast(&data).expect("valid payload");
        assert_eq!(forecast.len(), 2);
        assert_eq!(forecast[0].date, "Sat, Feb 07");
        assert_eq!(forecast[0].condition, "Rain");
        assert_eq!(forecast[1].date, "Sun, Feb 08");
        assert_eq!(forecast[1].condition, "Clear Sky");
    }

    #[test]
    fn majority_condition_wins_the_day() {
        let data = json!({
            "list": [
                interval("2026-02-07 09:00:00", 9.0, "light rain"),
                interval("2026-02-07 12:00:00", 11.0, "clouds"),
                interval("2026-02-07 15:00:00", 12.0, "clouds"),
            ],
        });

        let forecast = parse_forecast(&data).expect("valid payload");
        assert_eq!(forecast[0].condition, "Clouds");
    }

    #[test]
    fn condition_ties_go_to_the_first_seen() {
        let data = json!({
            "list": [
                interval("2026-02-07 09:00:00", 9.0, "light rain"),
                interval("2026-02-07 12:00:00", 11.0, "clouds"),
                interval("2026-02-07 15:00:00", 12.0, "light rain"),
                interval("2026-02-07 18:00:00", 10.0, "clouds"),
            ],
        });

        let forecast = parse_forecast(&data).expect("valid payload");
        assert_eq!(forecast[0].condition, "Light Rain");
    }

    #[test]
    fn empty_interval_list_yields_empty_forecast() {
        let data = json!({ "list": [] });
        let forecast = parse_forecast(&data).expect("valid payload");
        assert!(forecast.is_empty());
    }

    #[test]
    fn missing_list_is_malformed() {
        let err = parse_forecast(&json!({})).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn timestamp_without_time_half_is_malformed() {
        let data = json!({
            "list": [interval("2026-02-07", 10.0, "clouds")],
        });

        let err = parse_forecast(&data).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn title_case_handles_multiword_phrases() {
        assert_eq!(title_case("scattered clouds"), "Scattered Clouds");
        assert_eq!(title_case("rain"), "Rain");
        assert_eq!(title_case(""), "");
    }
}
