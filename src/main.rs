//! lumatrace - Main Entry Point
//!
//! Real-time region-of-interest luma monitoring with delayed-start session
//! recording. Commands on stdin: `s` start, `e` stop, `q` quit.

use anyhow::Context;
use lumatrace::{
    config::{AppConfig, SourceKind, CONFIG_FILE},
    control::StdinCommands,
    display::ConsoleDisplay,
    pipeline::FrameLoop,
    session::flush_session,
    source::{FrameSource, ImageSequenceSource, SyntheticSource},
};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lumatrace=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lumatrace");

    // Config path from the first argument, falling back to ./lumatrace.toml
    let config_path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("Loading config from {}", config_path))?;
    tracing::info!(
        "Region {} | history {} | smoothing {} | delay {}s",
        config.region,
        config.display.history_capacity,
        config.display.smoothing_window,
        config.recording.delay_secs,
    );

    let frame_interval = Duration::from_millis(config.source.frame_interval_ms);
    let source: Box<dyn FrameSource> = match config.source.kind {
        SourceKind::Synthetic => Box::new(SyntheticSource::new(
            config.source.width,
            config.source.height,
            frame_interval,
        )),
        SourceKind::Sequence => {
            // validate() guarantees the path is present for this kind
            let dir = config
                .source
                .path
                .as_ref()
                .context("sequence source requires source.path")?;
            Box::new(ImageSequenceSource::open(dir, frame_interval)?)
        }
    };

    let commands = StdinCommands::spawn();
    let display = ConsoleDisplay::default_rate();
    let mut frame_loop = FrameLoop::new(&config, source, commands, display);

    tracing::info!("Commands: 's' start, 'e' stop, 'q' quit");
    let run_result = frame_loop.run();

    // Flush whatever was recorded even when the loop ended with an error
    let rows = frame_loop.take_rows();
    match flush_session(&config.recording.output_path, &rows) {
        Ok(Some(count)) => tracing::info!(
            "Recorded data: {} rows -> {}",
            count,
            config.recording.output_path.display()
        ),
        Ok(None) => tracing::info!("No data recorded"),
        Err(e) => tracing::error!("Failed to save session: {}", e),
    }

    let exit = run_result?;
    tracing::info!("Shutting down ({:?})", exit);
    Ok(())
}
