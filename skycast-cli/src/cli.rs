use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use skycast_core::{
    CityQuery, Config, CurrentWeather, DailyForecast, WeatherClient, WeatherError,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show current weather and the 5-day forecast for a city.
    Show {
        /// City name, e.g. "London" or "New York".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let city = CityQuery::parse(Some(city)).map_err(user_error)?;
    let config = Config::load()?;
    let client = WeatherClient::new(config).map_err(user_error)?;

    eprintln!("Fetching weather data...");
    let report = client.lookup(&city).await.map_err(user_error)?;

    println!("Weather data for '{city}'");
    println!();
    print_current(&report.current);
    println!();
    print_forecast(&report.forecast);

    Ok(())
}

/// Swap the diagnostic rendering for the end-user message.
fn user_error(err: WeatherError) -> anyhow::Error {
    anyhow::anyhow!("{}", err.user_message())
}

fn print_current(current: &CurrentWeather) {
    println!("Current Weather");
    let rows = vec![
        vec!["Temperature".to_string(), current.temperature.clone()],
        vec!["Condition".to_string(), current.condition.clone()],
        vec!["Humidity".to_string(), current.humidity.clone()],
        vec!["Wind Speed".to_string(), current.wind_speed.clone()],
    ];
    print_table(&["Parameter", "Value"], &rows);
}

fn print_forecast(forecast: &[DailyForecast]) {
    println!("Forecast (up to 5 days, 3-hour intervals grouped by day)");
    let rows: Vec<Vec<String>> = forecast
        .iter()
        .map(|day| {
            vec![
                day.date.clone(),
                day.max_temp.clone(),
                day.min_temp.clone(),
                day.condition.clone(),
            ]
        })
        .collect();
    print_table(&["Date", "Max Temp", "Min Temp", "Condition"], &rows);
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    // Pad by char count, not byte length, so "°C" cells line up.
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    println!("{}", render_row(headers.iter().copied(), &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", rule.join("  "));
    for row in rows {
        println!("{}", render_row(row.iter().map(String::as_str), &widths));
    }
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
