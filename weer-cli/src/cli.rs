use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weer_core::{Config, FavoritesStore, WeatherClient, select_daily_forecast};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weer", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Current conditions for a city.
    Now {
        city: String,
    },

    /// Map marker for a city.
    Map {
        city: String,
    },

    /// Five-day forecast for a city.
    Forecast {
        city: String,
    },

    /// Show or edit favorite cities.
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// Show current settings.
    Settings,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorite cities (default).
    List,
    /// Add a city to the favorites.
    Add { city: String },
    /// Remove a city from the favorites.
    Remove { city: String },
}

impl Cli {
    pub async fn run(self, out: &mut impl Write) -> Result<()> {
        tracing::debug!(command = ?self.command, "running command");
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config, out),
            Command::Now { city } => now(&config, &city, out).await,
            Command::Map { city } => map(&config, &city, out).await,
            Command::Forecast { city } => forecast(&config, &city, out).await,
            Command::Favorites { action } => favorites(&config, action, out),
            Command::Settings => settings(&config, out),
        }
    }
}

fn configure(mut config: Config, out: &mut impl Write) -> Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    writeln!(out, "Configuratie opgeslagen in {}", path.display())?;
    Ok(())
}

fn client(config: &Config) -> Result<WeatherClient> {
    WeatherClient::new(config.provider_settings()?)
}

/// Trimmed city, or `None` after writing the empty-input hint.
fn city_or_hint<'a>(city: &'a str, hint: &str, out: &mut impl Write) -> Result<Option<&'a str>> {
    let city = city.trim();
    if city.is_empty() {
        writeln!(out, "{hint}")?;
        Ok(None)
    } else {
        Ok(Some(city))
    }
}

async fn now(config: &Config, city: &str, out: &mut impl Write) -> Result<()> {
    let Some(city) = city_or_hint(city, "Voer een stad in om het weer te bekijken", out)? else {
        return Ok(());
    };

    match client(config)?.fetch_current(city).await {
        Ok(snapshot) => render::current(&snapshot, out)?,
        Err(err) => writeln!(out, "{}", err.user_message())?,
    }
    Ok(())
}

async fn map(config: &Config, city: &str, out: &mut impl Write) -> Result<()> {
    let Some(city) = city_or_hint(city, "Voer een stad in om de weerkaart te bekijken", out)?
    else {
        return Ok(());
    };

    match client(config)?.fetch_current(city).await {
        Ok(snapshot) => render::map(&snapshot, out)?,
        Err(_) => writeln!(out, "Stad niet gevonden: {city}")?,
    }
    Ok(())
}

async fn forecast(config: &Config, city: &str, out: &mut impl Write) -> Result<()> {
    let Some(city) = city_or_hint(city, "Voer een stad in om de voorspelling te bekijken", out)?
    else {
        return Ok(());
    };

    match client(config)?.fetch_forecast(city).await {
        Ok(set) => {
            let title = set.city().to_string();
            render::forecast(&title, &select_daily_forecast(set), out)?;
        }
        Err(_) => writeln!(out, "Stad niet gevonden: {city}")?,
    }
    Ok(())
}

fn favorites(config: &Config, action: Option<FavoritesAction>, out: &mut impl Write) -> Result<()> {
    let store = FavoritesStore::new(config.favorites_path());
    let list = store.load()?;

    match action.unwrap_or(FavoritesAction::List) {
        FavoritesAction::List => render::favorites(&list, out)?,
        FavoritesAction::Add { city } => {
            let Some(city) = city_or_hint(&city, "Voer een stad in om toe te voegen", out)? else {
                return Ok(());
            };
            if list.contains(city) {
                writeln!(out, "{city} staat al in de favorieten")?;
            } else {
                store.add(list, city)?;
                writeln!(out, "{city} toegevoegd aan favorieten!")?;
            }
        }
        FavoritesAction::Remove { city } => {
            let Some(city) = city_or_hint(&city, "Voer een stad in om te verwijderen", out)? else {
                return Ok(());
            };
            if list.contains(city) {
                store.remove(list, city)?;
                writeln!(out, "{city} verwijderd uit favorieten!")?;
            } else {
                writeln!(out, "{city} staat niet in de favorieten")?;
            }
        }
    }
    Ok(())
}

fn settings(config: &Config, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Configuratiebestand: {}", Config::config_file_path()?.display())?;
    writeln!(
        out,
        "API-sleutel: {}",
        if config.is_configured() { "ingesteld" } else { "niet ingesteld" }
    )?;
    writeln!(out, "Favorieten: {}", config.favorites_path().display())?;
    Ok(())
}
