//! Logging setup

use color_eyre::eyre::{Result, WrapErr};
use std::fmt;
use std::fs::File;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Writer, fmt::layer, fmt::time::FormatTime,
    layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Wall time since logging started, whole seconds
struct ElapsedTimer {
    start: Instant,
}

impl ElapsedTimer {
    fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl FormatTime for ElapsedTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let total_seconds = self.start.elapsed().as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "+{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Route log output to `output_path`, or to stdout when none is given
pub fn setup_output(output_path: Option<&str>) -> Result<()> {
    match output_path {
        Some(path) => {
            let log = File::create(path)
                .wrap_err_with(|| format!("Could not create output file: {}", path))?;
            let file_layer = layer()
                .with_writer(log)
                .with_timer(ElapsedTimer::start())
                .with_ansi(false)
                .with_filter(LevelFilter::INFO);
            Registry::default().with(file_layer).init();
            info!("Output will be written to: {}", path);
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(ElapsedTimer::start())
                .with_ansi(true)
                .with_filter(LevelFilter::INFO);
            Registry::default().with(stdout_layer).init();
            info!("Output will be printed to stdout");
        }
    }
    Ok(())
}
