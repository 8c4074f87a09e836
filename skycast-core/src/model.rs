use serde::{Deserialize, Serialize};

/// Display-ready current conditions, every field pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// e.g. "20.5 °C"
    pub temperature: String,
    /// Title-cased description, e.g. "Clear Sky"
    pub condition: String,
    /// e.g. "65%"
    pub humidity: String,
    /// e.g. "3.2 m/s"
    pub wind_speed: String,
}

/// One aggregated forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Day label, e.g. "Sat, Feb 07"
    pub date: String,
    pub max_temp: String,
    pub min_temp: String,
    /// The day's most frequent condition, title-cased.
    pub condition: String,
}

/// Everything a single lookup produces, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Vec<DailyForecast>,
}
