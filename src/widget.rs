//! Widget orchestration: loads weather into the three views and routes
//! pointer and indicator-dot input into navigation.

use std::sync::mpsc::{self, Receiver};

use skyview_core::{AppError, ConfigError};
use skyview_nav::{NavigationSettings, PointerEvent, SwipeDirection, SwipeNavigation};
use skyview_weather::{CurrentWeather, DailyForecast, HourlyForecast, WeatherProvider};

/// Current conditions, next hours, next days
pub const VIEW_COUNT: usize = 3;

pub const VIEW_TITLES: [&str; VIEW_COUNT] = ["Now", "Next hours", "Next days"];

pub const FALLBACK_TITLE: &str = "Error";
pub const FALLBACK_DETAIL: &str = "Unable to load weather data";

/// Horizontal offset of the view strip, in percent of one view's width.
pub fn strip_offset_percent(index: usize) -> i64 {
    -(index as i64) * 100
}

/// Messages from the navigation observer back to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    ViewChanged(usize),
}

/// Presentation side of the widget.
pub trait WidgetRenderer {
    fn render_current(&mut self, current: &CurrentWeather);
    fn render_hourly(&mut self, hourly: &[HourlyForecast]);
    fn render_daily(&mut self, daily: &[DailyForecast]);

    /// Make `index` the active view and dot.
    fn show_view(&mut self, index: usize, total: usize);

    /// Replace the current view with the fallback state.
    fn show_error(&mut self, title: &str, detail: &str, hint: &str);

    /// Grab/grabbing cursor feedback while a mouse drag is held.
    fn set_dragging(&mut self, _dragging: bool) {}
}

pub struct WeatherWidget<R> {
    provider: WeatherProvider,
    location: String,
    navigation: SwipeNavigation,
    events: Receiver<WidgetEvent>,
    renderer: R,
    /// Input is wired up only after the first successful load
    interactive: bool,
}

impl<R: WidgetRenderer> WeatherWidget<R> {
    pub fn new(
        provider: WeatherProvider,
        location: impl Into<String>,
        settings: NavigationSettings,
        renderer: R,
    ) -> Result<Self, AppError> {
        if settings.total_views != VIEW_COUNT {
            return Err(ConfigError::Invalid(format!(
                "navigation.total_views must be {} (got {})",
                VIEW_COUNT, settings.total_views
            ))
            .into());
        }

        let (tx, events) = mpsc::channel();
        let navigation = SwipeNavigation::new(settings, move |index| {
            if tx.send(WidgetEvent::ViewChanged(index)).is_err() {
                tracing::trace!(index, "Widget dropped; view change not delivered");
            }
        })?;

        Ok(Self {
            provider,
            location: location.into(),
            navigation,
            events,
            renderer,
            interactive: false,
        })
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn current_view(&self) -> usize {
        self.navigation.current_index()
    }

    #[cfg(test)]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Fetch all three views and render them. On failure the fallback state
    /// is shown and input stays disabled.
    pub async fn load(&mut self) -> Result<(), AppError> {
        match self.fetch_and_render().await {
            Ok(()) => {
                self.interactive = true;
                let (index, total) = (self.navigation.current_index(), self.navigation.total_views());
                self.renderer.show_view(index, total);
                tracing::info!("Weather widget ready for {}", self.location);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to initialize weather widget: {}", e);
                self.renderer
                    .show_error(FALLBACK_TITLE, FALLBACK_DETAIL, e.user_message());
                Err(e)
            }
        }
    }

    async fn fetch_and_render(&mut self) -> Result<(), AppError> {
        let current = self.provider.fetch_current(&self.location).await?;
        self.renderer.render_current(&current);

        let hourly = self.provider.fetch_hourly(&self.location).await?;
        self.renderer.render_hourly(&hourly);

        let daily = self.provider.fetch_daily(&self.location).await?;
        self.renderer.render_daily(&daily);

        Ok(())
    }

    /// Route a touch or mouse event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<SwipeDirection> {
        if !self.interactive {
            return None;
        }
        let direction = self.navigation.handle_pointer(event);
        self.renderer.set_dragging(self.navigation.is_dragging());
        self.drain_events();
        direction
    }

    /// Indicator dot activation.
    pub fn select_dot(&mut self, index: usize) -> bool {
        if !self.interactive {
            return false;
        }
        let changed = self.navigation.go_to_view(index);
        self.drain_events();
        changed
    }

    fn drain_events(&mut self) {
        let total = self.navigation.total_views();
        while let Ok(event) = self.events.try_recv() {
            match event {
                WidgetEvent::ViewChanged(index) => self.renderer.show_view(index, total),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyview_nav::PointerPhase;
    use skyview_weather::ProviderSettings;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingRenderer {
        rendered: Vec<&'static str>,
        shown: Vec<usize>,
        errors: Vec<String>,
        dragging: bool,
    }

    impl WidgetRenderer for RecordingRenderer {
        fn render_current(&mut self, _current: &CurrentWeather) {
            self.rendered.push("current");
        }

        fn render_hourly(&mut self, _hourly: &[HourlyForecast]) {
            self.rendered.push("hourly");
        }

        fn render_daily(&mut self, _daily: &[DailyForecast]) {
            self.rendered.push("daily");
        }

        fn show_view(&mut self, index: usize, _total: usize) {
            self.shown.push(index);
        }

        fn show_error(&mut self, title: &str, detail: &str, _hint: &str) {
            self.errors.push(format!("{}: {}", title, detail));
        }

        fn set_dragging(&mut self, dragging: bool) {
            self.dragging = dragging;
        }
    }

    fn widget(settings: ProviderSettings) -> WeatherWidget<RecordingRenderer> {
        let provider = WeatherProvider::new(settings).unwrap();
        WeatherWidget::new(
            provider,
            "Coimbra, Portugal",
            NavigationSettings::default(),
            RecordingRenderer::default(),
        )
        .unwrap()
    }

    fn demo_widget() -> WeatherWidget<RecordingRenderer> {
        widget(ProviderSettings {
            demo_mode: true,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_load_renders_all_views() {
        let mut w = demo_widget();
        w.load().await.unwrap();
        assert_eq!(w.renderer().rendered, ["current", "hourly", "daily"]);
        assert_eq!(w.renderer().shown, [0]);
        assert!(w.is_interactive());
    }

    #[tokio::test]
    async fn test_swipe_and_dots_update_renderer() {
        let mut w = demo_widget();
        w.load().await.unwrap();

        w.handle_pointer(PointerEvent::mouse(PointerPhase::Start, 300.0, 50.0, 0));
        assert!(w.renderer().dragging);
        let direction = w.handle_pointer(PointerEvent::mouse(PointerPhase::End, 200.0, 60.0, 150));
        assert_eq!(direction, Some(SwipeDirection::Left));
        assert!(!w.renderer().dragging);
        assert_eq!(w.current_view(), 1);

        assert!(w.select_dot(2));
        assert!(!w.select_dot(2));
        assert!(!w.select_dot(7));
        assert_eq!(w.renderer().shown, [0, 1, 2]);
    }

    #[test]
    fn test_rejects_view_count_it_cannot_render() {
        for total_views in [2, 4] {
            let provider = WeatherProvider::new(ProviderSettings::default()).unwrap();
            let settings = NavigationSettings {
                total_views,
                ..Default::default()
            };
            let result = WeatherWidget::new(
                provider,
                "Coimbra, Portugal",
                settings,
                RecordingRenderer::default(),
            );
            assert!(matches!(result, Err(AppError::Config(ConfigError::Invalid(_)))));
        }
    }

    #[tokio::test]
    async fn test_failed_load_shows_fallback_and_ignores_input() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut w = widget(ProviderSettings {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            ..Default::default()
        });
        assert!(w.load().await.is_err());
        assert_eq!(w.renderer().errors, ["Error: Unable to load weather data"]);
        assert!(w.renderer().rendered.is_empty());
        assert!(!w.is_interactive());
        assert!(!w.select_dot(1));
        assert_eq!(w.current_view(), 0);
    }

    #[test]
    fn test_strip_offset() {
        assert_eq!(strip_offset_percent(0), 0);
        assert_eq!(strip_offset_percent(2), -200);
    }
}
