//! Weather service for SkyView
//!
//! Provides current, hourly and daily weather from the OpenWeather API with
//! an in-memory response cache and condition-to-icon mapping.

pub mod types;
pub mod cache;
pub mod demo;
pub mod parse;
pub mod provider;

pub use types::*;
pub use cache::{CachedWeather, WeatherCache};
pub use provider::{ProviderSettings, WeatherProvider};
