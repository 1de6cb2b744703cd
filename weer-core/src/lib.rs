//! Core library for the `weer` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeatherMap client (current conditions and 5-day forecast)
//! - Pure presentation helpers (units, colors, emoji, formatting)
//! - The persisted favorites list
//!
//! It is used by `weer-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod present;

pub use client::{ProviderSettings, WeatherClient};
pub use config::{Config, ProviderConfig};
pub use error::{MapperError, NotFoundReason, StoreError, WeatherError};
pub use favorites::FavoritesStore;
pub use model::{DailyForecast, FavoritesList, ForecastEntry, ForecastSet, WeatherSnapshot};
pub use present::{CurrentView, DailyCard, MapMarker, TemperatureColor, select_daily_forecast};
