use std::path::PathBuf;

use thiserror::Error;

/// Why a weather lookup produced no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Provider answered 404.
    UnknownCity,
    /// Provider answered with another non-200 status.
    Status(u16),
    /// The request could not be sent or the body could not be read.
    Transport,
    /// 200, but the body did not contain a complete snapshot or forecast.
    Malformed,
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundReason::UnknownCity => f.write_str("unknown city"),
            NotFoundReason::Status(code) => write!(f, "provider status {code}"),
            NotFoundReason::Transport => f.write_str("transport failure"),
            NotFoundReason::Malformed => f.write_str("malformed response"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No weather found for '{city}' ({reason})")]
    NotFound { city: String, reason: NotFoundReason },
}

impl WeatherError {
    pub(crate) fn not_found(city: &str, reason: NotFoundReason) -> Self {
        WeatherError::NotFound { city: city.to_string(), reason }
    }

    pub fn reason(&self) -> NotFoundReason {
        match self {
            WeatherError::NotFound { reason, .. } => *reason,
        }
    }

    /// Inline message shown to the user when a lookup fails.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::NotFound { city, .. } => format!(
                "Stad niet gevonden: {city}. Controleer de spelling en probeer het opnieuw."
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Favorites file {} is corrupt", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize favorites for {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to access favorites file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum MapperError {
    #[error("Invalid {what}: {value}")]
    InvalidInput { what: &'static str, value: String },
}

impl MapperError {
    pub(crate) fn invalid(what: &'static str, value: impl ToString) -> Self {
        MapperError::InvalidInput { what, value: value.to_string() }
    }
}
