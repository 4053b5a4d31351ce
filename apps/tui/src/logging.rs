use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Where log lines go. The interactive UI owns the screen, so it logs to a
/// file; headless runs log to stderr and keep stdout for the output.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

fn default_directives(debug: bool) -> &'static str {
    if debug {
        "exodo=debug,info"
    } else {
        "exodo=info,warn"
    }
}

pub fn init_tracing(debug: bool, target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_env("EXODO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));
    let json = env::var("EXODO_LOG_FORMAT").is_ok_and(|format| format == "json");

    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => {
            let layer = fmt::layer().with_writer(io::stderr);
            if json {
                registry.with(layer.json().with_ansi(false)).try_init()?;
            } else {
                registry.with(layer.compact()).try_init()?;
            }
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;
            let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
            if json {
                registry.with(layer.json()).try_init()?;
            } else {
                registry.with(layer.compact()).try_init()?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_widens_the_default_filter() {
        assert_eq!(default_directives(false), "exodo=info,warn");
        assert_eq!(default_directives(true), "exodo=debug,info");
    }
}
