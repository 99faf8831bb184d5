use std::io::BufRead;

use anyhow::{Context, Result};
use skyview_core::Config;
use skyview_weather::WeatherProvider;

mod script;
mod terminal;
mod widget;

use script::ScriptCommand;
use terminal::TerminalRenderer;
use widget::WeatherWidget;

fn main() -> Result<()> {
    // Initialize core
    skyview_core::init()?;

    let (config, _) = Config::load_validated()?;
    tracing::info!("Config directory: {}", config.config_dir.display());

    let provider = WeatherProvider::new(config.weather.provider_settings())
        .context("Failed to create weather provider")?;

    let mut widget = WeatherWidget::new(
        provider,
        config.weather.location.clone(),
        config.navigation,
        TerminalRenderer::new(std::io::stdout()),
    )?;

    // Single-threaded: network work and input handling share one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    if runtime.block_on(widget.load()).is_err() {
        // Fallback view already rendered
        return Ok(());
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        match script::parse_line(&line) {
            Ok(Some(ScriptCommand::Pointer(event))) => {
                if let Some(direction) = widget.handle_pointer(event) {
                    tracing::debug!(?direction, view = widget.current_view(), "Gesture handled");
                }
            }
            Ok(Some(ScriptCommand::Dot(index))) => {
                widget.select_dot(index);
            }
            Ok(Some(ScriptCommand::Quit)) => break,
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring input line {:?}: {}", line, e),
        }
    }

    tracing::info!("SkyView shutting down");
    Ok(())
}
