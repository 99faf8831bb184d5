//! OpenWeather response parsing.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use serde::Deserialize;

use crate::types::{CurrentWeather, DailyForecast, HourlyForecast, WeatherCondition, WeatherError};

/// Entries shown in the hourly view
pub const HOURLY_ENTRIES: usize = 5;
/// Days shown in the daily view
pub const DAILY_ENTRIES: usize = 5;
/// Local hours accepted as a day's representative (midday) sample
const MIDDAY_HOURS: std::ops::RangeInclusive<u32> = 11..=14;

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    #[serde(default)]
    sys: Option<SysInfo>,
    main: MainReadings,
    weather: Vec<ConditionInfo>,
    #[serde(default)]
    wind: Option<WindInfo>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct SysInfo {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ConditionInfo {
    id: i32,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
    #[serde(default)]
    city: Option<CityInfo>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainReadings,
    weather: Vec<ConditionInfo>,
}

#[derive(Debug, Deserialize)]
struct CityInfo {
    /// Shift from UTC in seconds
    #[serde(default)]
    timezone: Option<i32>,
}

impl ForecastResponse {
    fn offset(&self) -> FixedOffset {
        self.city
            .as_ref()
            .and_then(|c| c.timezone)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

/// Round half up, so -2.5 becomes -2 and 2.5 becomes 3.
fn round_temp(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp out of range: {}", secs)))
}

fn first_condition(weather: &[ConditionInfo]) -> Result<&ConditionInfo, WeatherError> {
    weather
        .first()
        .ok_or_else(|| WeatherError::Parse("missing weather condition".to_string()))
}

/// Parse a `/weather` response body.
pub fn current(body: &str) -> Result<CurrentWeather, WeatherError> {
    let resp: CurrentResponse = serde_json::from_str(body)?;
    let condition = first_condition(&resp.weather)?;

    Ok(CurrentWeather {
        location: resp.name.clone(),
        country: resp
            .sys
            .as_ref()
            .and_then(|s| s.country.clone())
            .unwrap_or_default(),
        temperature: round_temp(resp.main.temp),
        feels_like: round_temp(resp.main.feels_like.unwrap_or(resp.main.temp)),
        description: if condition.description.is_empty() {
            WeatherCondition::from_code(condition.id).description().to_string()
        } else {
            condition.description.clone()
        },
        icon: condition.icon.clone(),
        code: condition.id,
        humidity: resp.main.humidity.unwrap_or_default(),
        wind_speed: resp.wind.as_ref().map(|w| w.speed).unwrap_or_default(),
        observed_at: timestamp(resp.dt)?,
    })
}

/// Parse a `/forecast` response body into the next few 3-hour slots.
pub fn hourly(body: &str) -> Result<Vec<HourlyForecast>, WeatherError> {
    let resp: ForecastResponse = serde_json::from_str(body)?;
    let offset = resp.offset();

    resp.list
        .iter()
        .take(HOURLY_ENTRIES)
        .map(|entry| {
            let condition = first_condition(&entry.weather)?;
            let at = timestamp(entry.dt)?;
            Ok(HourlyForecast {
                time: at.with_timezone(&offset).format("%H:%M").to_string(),
                temperature: round_temp(entry.main.temp),
                icon: condition.icon.clone(),
                code: condition.id,
                timestamp: at,
            })
        })
        .collect()
}

/// Parse a `/forecast` response body into one entry per day.
///
/// Each day is represented by its first slot falling between 11:00 and 14:00
/// local time. Days without such a slot (typically today, late in the
/// afternoon) are skipped.
pub fn daily(body: &str) -> Result<Vec<DailyForecast>, WeatherError> {
    let resp: ForecastResponse = serde_json::from_str(body)?;
    let offset = resp.offset();

    let mut days = Vec::with_capacity(DAILY_ENTRIES);
    let mut seen: HashSet<NaiveDate> = HashSet::new();

    for entry in &resp.list {
        if days.len() >= DAILY_ENTRIES {
            break;
        }

        let at = timestamp(entry.dt)?;
        let local = at.with_timezone(&offset);
        if seen.contains(&local.date_naive()) || !MIDDAY_HOURS.contains(&local.hour()) {
            continue;
        }

        let condition = first_condition(&entry.weather)?;
        days.push(DailyForecast {
            day: local.format("%a").to_string(),
            temperature: round_temp(entry.main.temp),
            icon: condition.icon.clone(),
            code: condition.id,
            timestamp: at,
        });
        seen.insert(local.date_naive());
    }

    Ok(days)
}
