use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool, verbosity: u8) {
    JSON_MODE.store(json, Ordering::Relaxed);

    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum Status {
    Ok,
    Warn,
    Error,
}

/// One-line status message on stderr. Suppressed in JSON mode.
pub fn status(kind: Status, msg: &str) {
    if is_json() {
        return;
    }
    let color = match kind {
        Status::Ok => Color::Green,
        Status::Warn => Color::Yellow,
        Status::Error => Color::Red,
    };
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    let _ = err.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(err, "==> ");
    let _ = err.reset();
    let _ = writeln!(err, "{msg}");
}
