//! Pure conversions from provider values to display values.
//!
//! Nothing here does I/O. Numeric inputs must be finite (and within range
//! where a range applies); anything else is rejected with
//! [`MapperError::InvalidInput`].

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::{
    error::MapperError,
    model::{DailyForecast, ForecastEntry, WeatherSnapshot},
};

/// Hour of day (provider clock) sampled for the daily forecast.
pub const REFERENCE_HOUR: u32 = 12;

/// Maximum number of days in a [`DailyForecast`].
pub const DAILY_FORECAST_DAYS: usize = 5;

pub const DEFAULT_EMOJI: &str = "🌤️";

/// Keyword table for [`weather_emoji`]. Order matters: the first keyword found
/// in the description wins.
pub const EMOJI_TABLE: &[(&str, &str)] = &[
    ("zonnig", "☀️"),
    ("bewolkt", "☁️"),
    ("regen", "🌧️"),
    ("onweer", "⛈️"),
    ("sneeuw", "🌨️"),
    ("mist", "🌫️"),
    ("drizzle", "🌦️"),
    ("storm", "🌪️"),
];

const MAP_ZOOM: u8 = 10;

/// Temperature band, coldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureColor {
    Freezing,
    Cold,
    Mild,
    Warm,
    Hot,
}

impl TemperatureColor {
    pub fn hex(&self) -> &'static str {
        match self {
            TemperatureColor::Freezing => "#2196F3",
            TemperatureColor::Cold => "#64B5F6",
            TemperatureColor::Mild => "#4CAF50",
            TemperatureColor::Warm => "#FFC107",
            TemperatureColor::Hot => "#F44336",
        }
    }
}

fn finite(what: &'static str, value: f64) -> Result<f64, MapperError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MapperError::invalid(what, value))
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> Result<f64, MapperError> {
    let c = finite("temperature", celsius)?;
    Ok(c * 9.0 / 5.0 + 32.0)
}

/// Buckets are half-open `[lower, upper)`, so 0, 10, 20 and 30 °C fall in the
/// warmer band.
pub fn temperature_color(celsius: f64) -> Result<TemperatureColor, MapperError> {
    let c = finite("temperature", celsius)?;

    let color = if c < 0.0 {
        TemperatureColor::Freezing
    } else if c < 10.0 {
        TemperatureColor::Cold
    } else if c < 20.0 {
        TemperatureColor::Mild
    } else if c < 30.0 {
        TemperatureColor::Warm
    } else {
        TemperatureColor::Hot
    };

    Ok(color)
}

pub fn weather_emoji(description: &str) -> &'static str {
    let lower = description.to_lowercase();

    EMOJI_TABLE
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, emoji)| *emoji)
        .unwrap_or(DEFAULT_EMOJI)
}

fn local_time(
    ts: DateTime<Utc>,
    utc_offset_seconds: i32,
) -> Result<DateTime<FixedOffset>, MapperError> {
    let offset = FixedOffset::east_opt(utc_offset_seconds)
        .ok_or_else(|| MapperError::invalid("UTC offset", utc_offset_seconds))?;
    Ok(ts.with_timezone(&offset))
}

/// `HH:MM` in the city's local time.
pub fn format_clock(ts: DateTime<Utc>, utc_offset_seconds: i32) -> Result<String, MapperError> {
    Ok(local_time(ts, utc_offset_seconds)?.format("%H:%M").to_string())
}

/// `DD-MM-YYYY HH:MM` in the city's local time.
pub fn format_datetime(
    ts: DateTime<Utc>,
    utc_offset_seconds: i32,
) -> Result<String, MapperError> {
    Ok(local_time(ts, utc_offset_seconds)?
        .format("%d-%m-%Y %H:%M")
        .to_string())
}

/// `DD-MM` on the provider clock, used on forecast cards.
pub fn format_day(ts: DateTime<Utc>) -> String {
    ts.format("%d-%m").to_string()
}

pub fn format_humidity(percent: i64) -> Result<String, MapperError> {
    if !(0..=100).contains(&percent) {
        return Err(MapperError::invalid("humidity", percent));
    }
    Ok(format!("{percent}%"))
}

/// First character upper case, the rest lower case.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Forecast entries at [`REFERENCE_HOUR`], one per date, first five, in input order.
pub fn select_daily_forecast<I>(entries: I) -> DailyForecast
where
    I: IntoIterator<Item = ForecastEntry>,
{
    let mut days: Vec<ForecastEntry> = Vec::with_capacity(DAILY_FORECAST_DAYS);

    for entry in entries {
        let t = entry.timestamp;
        if t.hour() != REFERENCE_HOUR || t.minute() != 0 || t.second() != 0 {
            continue;
        }
        if days.iter().any(|d| d.timestamp.date_naive() == t.date_naive()) {
            continue;
        }
        days.push(entry);
        if days.len() == DAILY_FORECAST_DAYS {
            break;
        }
    }

    DailyForecast::from_entries(days)
}

/// Display values for the current-conditions page.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub title: String,
    pub observed_at: String,
    pub temperature: String,
    pub feels_like: String,
    pub fahrenheit: String,
    pub color: TemperatureColor,
    pub emoji: &'static str,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub sunrise: String,
    pub sunset: String,
}

impl CurrentView {
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Result<Self, MapperError> {
        let temp = finite("temperature", snapshot.temperature_celsius)?;
        let feels_like = finite("feels-like temperature", snapshot.feels_like_celsius)?;
        let wind = finite("wind speed", snapshot.wind_speed_mps)?;
        if wind < 0.0 {
            return Err(MapperError::invalid("wind speed", wind));
        }
        let offset = snapshot.utc_offset_seconds;

        Ok(Self {
            title: capitalize(&snapshot.city),
            observed_at: format_datetime(snapshot.observed_at, offset)?,
            temperature: format!("{temp:.1}°C"),
            feels_like: format!("{feels_like:.1}°C"),
            fahrenheit: format!("{:.1}°F", celsius_to_fahrenheit(temp)?),
            color: temperature_color(temp)?,
            emoji: weather_emoji(&snapshot.description),
            description: capitalize(&snapshot.description),
            humidity: format_humidity(i64::from(snapshot.humidity_percent))?,
            wind: format!("{wind} m/s"),
            sunrise: format_clock(snapshot.sunrise, offset)?,
            sunset: format_clock(snapshot.sunset, offset)?,
        })
    }
}

/// One card of the five-day forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCard {
    pub date: String,
    pub temperature: String,
    pub description: String,
}

impl DailyCard {
    pub fn from_entry(entry: &ForecastEntry) -> Result<Self, MapperError> {
        let temp = finite("temperature", entry.temperature_celsius)?;

        Ok(Self {
            date: format_day(entry.timestamp),
            temperature: format!("{temp:.1}°C"),
            description: capitalize(&entry.description),
        })
    }
}

/// Marker for the map page.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub popup: String,
    pub zoom: u8,
}

impl MapMarker {
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Result<Self, MapperError> {
        let lat = finite("latitude", snapshot.latitude)?;
        let lon = finite("longitude", snapshot.longitude)?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MapperError::invalid("latitude", lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(MapperError::invalid("longitude", lon));
        }

        Ok(Self {
            latitude: lat,
            longitude: lon,
            popup: snapshot.city.clone(),
            zoom: MAP_ZOOM,
        })
    }

    pub fn openstreetmap_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude,
            zoom = self.zoom,
        )
    }
}
