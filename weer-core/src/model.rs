use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point-in-time observation for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    pub humidity_percent: u8,
    pub wind_speed_mps: f64,
    pub description: String,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub observed_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Shift from UTC of the city, as reported by the provider.
    pub utc_offset_seconds: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature_celsius: f64,
    pub description: String,
}

/// Forecast window returned by one provider call.
///
/// Consumed by iterating; once drained it cannot be restarted.
#[derive(Debug)]
pub struct ForecastSet {
    city: String,
    entries: std::vec::IntoIter<ForecastEntry>,
}

impl ForecastSet {
    pub fn new(city: String, entries: Vec<ForecastEntry>) -> Self {
        Self { city, entries: entries.into_iter() }
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl Iterator for ForecastSet {
    type Item = ForecastEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for ForecastSet {}

/// At most five forecast entries, one per day, ascending by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyForecast(Vec<ForecastEntry>);

impl DailyForecast {
    pub(crate) fn from_entries(entries: Vec<ForecastEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a DailyForecast {
    type Item = &'a ForecastEntry;
    type IntoIter = std::slice::Iter<'a, ForecastEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// User-curated city names in insertion order.
///
/// Membership is an exact, case-sensitive string match: "Utrecht" and
/// "utrecht" are different favorites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesList(Vec<String>);

impl FavoritesList {
    /// Build a list, dropping repeated names (first occurrence wins).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for name in names {
            list.insert(name.into());
        }
        list
    }

    pub fn contains(&self, city: &str) -> bool {
        self.0.iter().any(|c| c == city)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub(crate) fn insert(&mut self, city: String) {
        if !self.contains(&city) {
            self.0.push(city);
        }
    }

    pub(crate) fn remove_all(&mut self, city: &str) {
        self.0.retain(|c| c != city);
    }
}

impl<'a> IntoIterator for &'a FavoritesList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
