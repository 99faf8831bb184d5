use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;
use url::Url;

use crate::cache::{Cacheable, WeatherCache, DEFAULT_TTL};
use crate::demo;
use crate::parse;
use crate::types::{CurrentWeather, DailyForecast, ForecastKind, HourlyForecast, Units, WeatherError};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connection and presentation settings for [`WeatherProvider`]
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub units: Units,
    pub lang: String,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
    /// Serve built-in sample data instead of calling the API
    pub demo_mode: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            units: Units::Metric,
            lang: "it".to_string(),
            cache_ttl: DEFAULT_TTL,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            demo_mode: false,
        }
    }
}

/// OpenWeather client with a response cache in front of it.
#[derive(Debug)]
pub struct WeatherProvider {
    client: Client,
    settings: ProviderSettings,
    cache: Mutex<WeatherCache>,
}

impl WeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            client,
            cache: Mutex::new(WeatherCache::new(settings.cache_ttl)),
            settings,
        })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Current conditions for a city name or "lat,lon" query.
    pub async fn fetch_current(&self, location: &str) -> Result<CurrentWeather, WeatherError> {
        if self.settings.demo_mode {
            return Ok(demo::current(location));
        }
        self.cached_or_fetch(location, || async move {
            let body = self.get_body(ForecastKind::Current, location).await?;
            parse::current(&body)
        })
        .await
    }

    /// The next few forecast slots.
    pub async fn fetch_hourly(&self, location: &str) -> Result<Vec<HourlyForecast>, WeatherError> {
        if self.settings.demo_mode {
            return Ok(demo::hourly());
        }
        self.cached_or_fetch(location, || async move {
            let body = self.get_body(ForecastKind::Hourly, location).await?;
            parse::hourly(&body)
        })
        .await
    }

    /// One midday entry per upcoming day.
    pub async fn fetch_daily(&self, location: &str) -> Result<Vec<DailyForecast>, WeatherError> {
        if self.settings.demo_mode {
            return Ok(demo::daily());
        }
        self.cached_or_fetch(location, || async move {
            let body = self.get_body(ForecastKind::Daily, location).await?;
            parse::daily(&body)
        })
        .await
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    pub fn invalidate(&self, kind: ForecastKind, location: &str) -> bool {
        self.cache.lock().invalidate(kind, location)
    }

    async fn cached_or_fetch<T, F, Fut>(&self, location: &str, fetch: F) -> Result<T, WeatherError>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, WeatherError>>,
    {
        let cached = self.cache.lock().get::<T>(location);
        if let Some(hit) = cached {
            tracing::debug!("Using cached {} weather for {}", T::KIND.as_str(), location);
            return Ok(hit);
        }

        let data = fetch().await?;
        self.cache.lock().insert(location, data.clone());
        Ok(data)
    }

    fn build_url(&self, kind: ForecastKind, location: &str) -> Result<Url, WeatherError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let url = Url::parse_with_params(
            &format!("{}/{}", base, kind.endpoint()),
            &[
                ("q", location),
                ("appid", self.settings.api_key.as_str()),
                ("units", self.settings.units.as_query()),
                ("lang", self.settings.lang.as_str()),
            ],
        )?;
        Ok(url)
    }

    async fn get_body(&self, kind: ForecastKind, location: &str) -> Result<String, WeatherError> {
        let url = self.build_url(kind, location)?;
        tracing::info!("Fetching {} weather for {}", kind.as_str(), location);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Weather API returned status {}", status);
            return Err(WeatherError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> WeatherProvider {
        WeatherProvider::new(ProviderSettings {
            base_url: base_url.to_string(),
            api_key: "secret".to_string(),
            lang: "en".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_build_url_encodes_query() {
        let p = provider("https://api.example.com/data/2.5/");
        let url = p.build_url(ForecastKind::Current, "Coimbra, Portugal").unwrap();
        assert_eq!(url.path(), "/data/2.5/weather");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("q".into(), "Coimbra, Portugal".into())));
        assert!(query.contains(&("appid".into(), "secret".into())));
        assert!(query.contains(&("units".into(), "metric".into())));
        assert!(query.contains(&("lang".into(), "en".into())));
    }

    #[test]
    fn test_build_url_forecast_endpoint() {
        let p = provider(DEFAULT_BASE_URL);
        let url = p.build_url(ForecastKind::Daily, "Lisbon").unwrap();
        assert!(url.as_str().starts_with("https://api.openweathermap.org/data/2.5/forecast?"));
    }

    #[test]
    fn test_invalid_base_url() {
        let p = provider("not a url");
        assert!(matches!(
            p.build_url(ForecastKind::Current, "Lisbon"),
            Err(WeatherError::Url(_))
        ));
    }

    #[tokio::test]
    async fn test_demo_mode_skips_network() {
        let p = WeatherProvider::new(ProviderSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            demo_mode: true,
            ..Default::default()
        })
        .unwrap();
        let current = p.fetch_current("Coimbra, Portugal").await.unwrap();
        assert_eq!(current.location, "Coimbra");
        assert_eq!(p.fetch_hourly("Coimbra").await.unwrap().len(), 5);
        assert_eq!(p.fetch_daily("Coimbra").await.unwrap().len(), 5);
    }
}
