//! Plain-text renderer for running the widget in a terminal.

use std::io::Write;

use skyview_weather::{CurrentWeather, DailyForecast, HourlyForecast, WeatherCondition};

use crate::widget::{strip_offset_percent, WidgetRenderer, VIEW_COUNT, VIEW_TITLES};

/// Keeps one text block per view and prints the active one.
pub struct TerminalRenderer<W: Write> {
    out: W,
    views: [Vec<String>; VIEW_COUNT],
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            views: Default::default(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, lines: &[String]) {
        for line in lines {
            if let Err(e) = writeln!(self.out, "{}", line) {
                tracing::warn!("Failed to write to terminal: {}", e);
                return;
            }
        }
    }
}

fn icon(code: i32) -> &'static str {
    WeatherCondition::from_code(code).icon_name()
}

fn dots(index: usize, total: usize) -> String {
    (0..total)
        .map(|i| if i == index { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

impl<W: Write> WidgetRenderer for TerminalRenderer<W> {
    fn render_current(&mut self, current: &CurrentWeather) {
        self.views[0] = vec![
            format!("{}°  [{}]", current.temperature, current.condition().icon_name()),
            current.place_label(),
            format!(
                "{} · feels like {}° · humidity {}% · wind {} · backdrop {}",
                current.description,
                current.feels_like,
                current.humidity,
                current.wind_speed,
                current.backdrop().as_str()
            ),
        ];
    }

    fn render_hourly(&mut self, hourly: &[HourlyForecast]) {
        self.views[1] = hourly
            .iter()
            .map(|h| format!("{:>5}  {:>3}°  [{}]", h.time, h.temperature, icon(h.code)))
            .collect();
    }

    fn render_daily(&mut self, daily: &[DailyForecast]) {
        self.views[2] = daily
            .iter()
            .map(|d| format!("{:>5}  {:>3}°  [{}]", d.day, d.temperature, icon(d.code)))
            .collect();
    }

    fn show_view(&mut self, index: usize, total: usize) {
        let title = VIEW_TITLES.get(index).copied().unwrap_or("View");
        let mut lines = vec![format!(
            "── {} ── (strip offset {}%)",
            title,
            strip_offset_percent(index)
        )];
        lines.extend(self.views.get(index).cloned().unwrap_or_default());
        lines.push(dots(index, total));
        self.emit(&lines);
    }

    fn show_error(&mut self, title: &str, detail: &str, hint: &str) {
        let lines = [title.to_string(), detail.to_string(), hint.to_string()];
        self.emit(&lines);
    }

    fn set_dragging(&mut self, dragging: bool) {
        let cursor = if dragging { "grabbing" } else { "grab" };
        tracing::trace!(cursor, "Cursor changed");
    }
}
