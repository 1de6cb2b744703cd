use anyhow::Context;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{NotFoundReason, WeatherError},
    model::{ForecastEntry, ForecastSet, WeatherSnapshot},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Language of provider descriptions. The emoji table matches Dutch keywords.
pub const RESPONSE_LANG: &str = "nl";

const UNITS: &str = "metric";

/// Everything the client needs to talk to the provider, fixed at startup.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    pub lang: String,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("lang", &self.lang)
            .finish()
    }
}

/// Current-conditions and forecast queries against OpenWeatherMap.
///
/// Every failure, whatever its cause, surfaces as [`WeatherError::NotFound`];
/// the attached [`NotFoundReason`] tells the causes apart.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    settings: ProviderSettings,
    http: Client,
}

impl WeatherClient {
    pub fn new(settings: ProviderSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { settings, http })
    }

    pub async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;

        parsed.into_snapshot(city).ok_or_else(|| {
            tracing::warn!(city, "OpenWeather current response is incomplete");
            WeatherError::not_found(city, NotFoundReason::Malformed)
        })
    }

    pub async fn fetch_forecast(&self, city: &str) -> Result<ForecastSet, WeatherError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;

        parsed.into_forecast(city).ok_or_else(|| {
            tracing::warn!(city, "OpenWeather forecast response is incomplete");
            WeatherError::not_found(city, NotFoundReason::Malformed)
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), endpoint);
        tracing::debug!(%url, city, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.settings.api_key.as_str()),
                ("units", UNITS),
                ("lang", self.settings.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, endpoint, "OpenWeather request failed");
                WeatherError::not_found(city, NotFoundReason::Transport)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            tracing::warn!(error = %e, endpoint, "Failed to read OpenWeather response body");
            WeatherError::not_found(city, NotFoundReason::Transport)
        })?;

        if status != StatusCode::OK {
            tracing::warn!(
                %status,
                endpoint,
                body = %truncate_body(&body),
                "OpenWeather request was not successful"
            );
            let reason = if status == StatusCode::NOT_FOUND {
                NotFoundReason::UnknownCity
            } else {
                NotFoundReason::Status(status.as_u16())
            };
            return Err(WeatherError::not_found(city, reason));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, endpoint, "Failed to parse OpenWeather JSON");
            WeatherError::not_found(city, NotFoundReason::Malformed)
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    humidity: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    dt: i64,
    #[serde(default)]
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    coord: OwCoord,
}

impl OwCurrentResponse {
    fn into_snapshot(self, query: &str) -> Option<WeatherSnapshot> {
        let humidity = self.main.humidity?;
        let humidity_percent = u8::try_from(humidity).ok().filter(|h| *h <= 100)?;
        let description = self.weather.into_iter().next()?.description;

        let city = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| query.to_string());

        Some(WeatherSnapshot {
            city,
            temperature_celsius: self.main.temp,
            feels_like_celsius: self.main.feels_like?,
            humidity_percent,
            wind_speed_mps: self.wind.speed,
            description,
            sunrise: unix_to_utc(self.sys.sunrise)?,
            sunset: unix_to_utc(self.sys.sunset)?,
            observed_at: unix_to_utc(self.dt)?,
            latitude: self.coord.lat,
            longitude: self.coord.lon,
            utc_offset_seconds: self.timezone,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    city: Option<OwCity>,
    list: Vec<OwForecastItem>,
}

impl OwForecastResponse {
    fn into_forecast(self, query: &str) -> Option<ForecastSet> {
        let entries = self
            .list
            .into_iter()
            .map(|item| {
                Some(ForecastEntry {
                    timestamp: unix_to_utc(item.dt)?,
                    temperature_celsius: item.main.temp,
                    description: item.weather.into_iter().next()?.description,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        let city = self
            .city
            .map(|c| c.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| query.to_string());

        Some(ForecastSet::new(city, entries))
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
