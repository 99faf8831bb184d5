//! Fixed sample data for running without an API key.

use chrono::{DateTime, Duration, Utc};

use crate::types::{CurrentWeather, DailyForecast, HourlyForecast};

// 2026-01-05 12:00:00 UTC
const DEMO_EPOCH: i64 = 1_767_614_400;

fn demo_time(offset: Duration) -> DateTime<Utc> {
    DateTime::from_timestamp(DEMO_EPOCH, 0).unwrap_or_default() + offset
}

pub fn current(location: &str) -> CurrentWeather {
    // "Coimbra, Portugal" -> "Coimbra"
    let city = location.split(',').next().unwrap_or(location).trim();
    CurrentWeather {
        location: city.to_string(),
        country: "PT".to_string(),
        temperature: 18,
        feels_like: 17,
        description: "few clouds".to_string(),
        icon: "02d".to_string(),
        code: 801,
        humidity: 62,
        wind_speed: 3.1,
        observed_at: demo_time(Duration::zero()),
    }
}

pub fn hourly() -> Vec<HourlyForecast> {
    [(18, 801), (19, 800), (17, 803), (15, 500), (13, 500)]
        .into_iter()
        .enumerate()
        .map(|(i, (temperature, code))| {
            let at = demo_time(Duration::hours(3 * i as i64));
            HourlyForecast {
                time: at.format("%H:%M").to_string(),
                temperature,
                icon: "02d".to_string(),
                code,
                timestamp: at,
            }
        })
        .collect()
}

pub fn daily() -> Vec<DailyForecast> {
    [(18, 801), (16, 500), (14, 211), (15, 803), (19, 800)]
        .into_iter()
        .enumerate()
        .map(|(i, (temperature, code))| {
            let at = demo_time(Duration::days(i as i64));
            DailyForecast {
                day: at.format("%a").to_string(),
                temperature,
                icon: "02d".to_string(),
                code,
                timestamp: at,
            }
        })
        .collect()
}
