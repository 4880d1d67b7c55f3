use anyhow::Context;
use clap::{Parser, Subcommand};
use cyweather_core::{Config, WeatherBackend, WeatherClient, WeatherQuery};
use inquire::Text;
use std::path::Path;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cyweather", version, about = "CY Weather CLI")]
pub struct Cli {
    /// Backend base URL for this invocation, e.g. "http://localhost:8000/api".
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Current {
        city: String,

        /// ISO country code, e.g. "FR" or "US".
        #[arg(long)]
        country: Option<String>,
    },

    /// Show the daily forecast for a city.
    Forecast {
        city: String,

        /// ISO country code, e.g. "FR" or "US".
        #[arg(long)]
        country: Option<String>,
    },

    /// Check that the backend is reachable.
    Health,

    /// Store the backend base URL in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = Config::config_file_path()?;

        if let Command::Configure = self.command {
            let config = configure(&path, self.base_url)?;
            println!("Saved base URL {} to {}", config.base_url, path.display());
            return Ok(());
        }

        let config = self.resolve_config(&path, |key| std::env::var(key).ok())?;
        tracing::debug!(base_url = %config.base_url, "resolved configuration");

        let client = WeatherClient::new(config);
        let output = execute(&client, self.command).await?;
        println!("{output}");

        Ok(())
    }

    /// `--base-url` wins without touching the config file; otherwise the file
    /// is loaded and the environment override applied.
    fn resolve_config<F>(&self, path: &Path, lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = &self.base_url {
            return Ok(Config::new(url.clone()));
        }

        Config::resolve(path, lookup)
    }
}

/// Run a read-only command against `backend` and return the text to print.
pub async fn execute(backend: &dyn WeatherBackend, command: Command) -> anyhow::Result<String> {
    match command {
        Command::Current { city, country } => {
            let query = WeatherQuery::new(city, country);
            let weather = backend.current_weather(&query).await?;
            Ok(render::current(&weather))
        }
        Command::Forecast { city, country } => {
            let query = WeatherQuery::new(city, country);
            let forecast = backend.forecast(&query).await?;
            Ok(render::forecast(&forecast))
        }
        Command::Health => {
            let health = backend.health().await?;
            if !health.is_ok() {
                anyhow::bail!("Backend reported status '{}'", health.status);
            }
            Ok(format!("Backend is healthy ({})", health.status))
        }
        Command::Configure => anyhow::bail!("`configure` does not talk to the backend"),
    }
}

/// Write the base URL to the config file at `path`.
///
/// An unreadable file is replaced rather than reported, and the environment
/// override is never persisted.
fn configure(path: &Path, base_url: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load_from(path).unwrap_or_else(|err| {
        tracing::warn!("ignoring unreadable config file: {err:#}");
        Config::default()
    });

    let answer = match base_url {
        Some(url) => url,
        None => Text::new("Backend base URL:")
            .with_default(&config.base_url)
            .prompt()
            .context("Failed to read base URL")?,
    };
    config.base_url = answer.trim().to_string();

    config.save_to(path)?;
    Ok(config)
}
