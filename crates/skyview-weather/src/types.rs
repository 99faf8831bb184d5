use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Measurement system requested from OpenWeather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    /// Kelvin
    Standard,
}

impl Units {
    /// Value of the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Standard => "standard",
        }
    }
}

/// Which of the three widget views a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastKind {
    Current,
    Hourly,
    Daily,
}

impl ForecastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }

    /// OpenWeather endpoint serving this kind
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Current => "weather",
            Self::Hourly | Self::Daily => "forecast",
        }
    }
}

/// Weather condition groups mapped from OpenWeather condition codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Drizzle,
    Rain,
    Snow,
    /// Mist, smoke, haze, dust, fog and the rest of the 7xx group
    Atmosphere,
    Thunderstorm,
}

impl WeatherCondition {
    /// Convert an OpenWeather condition id to a condition group
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_code(code: i32) -> Self {
        match code {
            200..=299 => Self::Thunderstorm,
            300..=399 => Self::Drizzle,
            500..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Atmosphere,
            800 => Self::Clear,
            801 | 802 => Self::PartlyCloudy,
            803 | 804 => Self::Cloudy,
            _ => Self::Clear, // Unknown codes default to clear
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Atmosphere => "Mist",
            Self::Thunderstorm => "Thunderstorm",
        }
    }

    /// Material Symbols glyph name
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "clear_day",
            Self::PartlyCloudy => "partly_cloudy_day",
            Self::Cloudy => "cloud",
            Self::Drizzle => "rainy_light",
            Self::Rain => "rainy",
            Self::Snow => "weather_snowy",
            Self::Atmosphere => "mist",
            Self::Thunderstorm => "thunderstorm",
        }
    }
}

/// Background theme for the current-weather view.
///
/// Coarser than [`WeatherCondition`]: drizzle and the unassigned 4xx block
/// both use the rain backdrop, and atmosphere codes use clouds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    #[default]
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
}

impl Backdrop {
    pub fn from_code(code: i32) -> Self {
        match code {
            200..=299 => Self::Thunderstorm,
            300..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Clouds,
            800 => Self::Clear,
            801..=i32::MAX => Self::Clouds,
            _ => Self::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
        }
    }
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: String,
    pub country: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub description: String,
    /// OpenWeather icon id, e.g. "10d"
    pub icon: String,
    pub code: i32,
    pub humidity: u8,
    pub wind_speed: f64,
    pub observed_at: DateTime<Utc>,
}

impl CurrentWeather {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.code)
    }

    pub fn backdrop(&self) -> Backdrop {
        Backdrop::from_code(self.code)
    }

    /// "Coimbra, PT", or just the city when the country is unknown
    pub fn place_label(&self) -> String {
        if self.country.is_empty() {
            self.location.clone()
        } else {
            format!("{}, {}", self.location, self.country)
        }
    }
}

/// Hourly forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Local wall-clock time, "HH:MM"
    pub time: String,
    pub temperature: i32,
    pub icon: String,
    pub code: i32,
    pub timestamp: DateTime<Utc>,
}

impl HourlyForecast {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.code)
    }
}

/// Daily forecast entry, taken from the midday sample of each day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Abbreviated weekday, e.g. "Mon"
    pub day: String,
    pub temperature: i32,
    pub icon: String,
    pub code: i32,
    pub timestamp: DateTime<Utc>,
}

impl DailyForecast {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.code)
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Parse(e.to_string())
    }
}
