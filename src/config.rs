use serde::Deserialize;
use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Knobs for one booking process.
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingConfig {
    /// Rows generated into the catalog at startup.
    pub catalog_size: usize,
    /// Travel date stamped on every catalog row.
    pub travel_date: String,
    /// Seats in each mock seat map.
    pub seat_map_size: u32,
    /// Seats marked booked in each mock seat map. Clamped to the map size.
    pub seat_map_booked: usize,
    /// Rows shown in the train table and offered as train choices.
    pub display_limit: usize,
    /// Fixed seed for reproducible runs. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            catalog_size: 5000,
            travel_date: "2025-12-10".to_string(),
            seat_map_size: 24,
            seat_map_booked: 6,
            display_limit: 10,
            seed: None,
        }
    }
}

impl BookingConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_limit == 0 {
            return Err(ConfigError::Invalid("display_limit must be at least 1".into()));
        }
        Ok(())
    }

    pub fn with_catalog_size(mut self, n: usize) -> Self {
        self.catalog_size = n;
        self
    }

    pub fn with_travel_date(mut self, date: impl Into<String>) -> Self {
        self.travel_date = date.into();
        self
    }

    pub fn with_seat_map(mut self, size: u32, booked: usize) -> Self {
        self.seat_map_size = size;
        self.seat_map_booked = booked;
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
