use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA: &str = "data.json";
pub const DEFAULT_MAPS: &str = "maps.json";
pub const DEFAULT_PAGE: &str = "fatos.html";
pub const DEFAULT_LOG_FILE: &str = "exodo.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where a catalog resource comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Http(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` values are fetched, anything else is a path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Http(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data: Source,
    pub maps: Source,
    /// Page name used when building share links.
    pub page: String,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
}

/// Loads `.env`, then reads the `EXODO_*` variables.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    dotenv().ok();

    let data = env::var("EXODO_DATA").unwrap_or_else(|_| DEFAULT_DATA.to_string());
    let maps = env::var("EXODO_MAPS").unwrap_or_else(|_| DEFAULT_MAPS.to_string());
    if data.trim().is_empty() {
        return Err(eyre!("EXODO_DATA must not be empty"));
    }

    let timeout = match env::var("EXODO_TIMEOUT") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| eyre!("Invalid EXODO_TIMEOUT {raw:?}: {e}"))?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    Ok(AppConfig {
        data: Source::parse(&data),
        maps: Source::parse(&maps),
        page: env::var("EXODO_PAGE").unwrap_or_else(|_| DEFAULT_PAGE.to_string()),
        timeout: Duration::from_secs(timeout),
        log_file: env::var("EXODO_LOG_FILE")
            .map_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
        debug: env::var("DEBUG").is_ok(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_paths_are_told_apart() {
        assert_eq!(
            Source::parse("https://example.org/data.json"),
            Source::Http("https://example.org/data.json".to_string())
        );
        assert_eq!(
            Source::parse("HTTP://example.org/maps.json"),
            Source::Http("HTTP://example.org/maps.json".to_string())
        );
        assert_eq!(
            Source::parse(" site/data.json "),
            Source::File(PathBuf::from("site/data.json"))
        );
    }

    #[test]
    fn display_shows_the_location() {
        assert_eq!(Source::parse("maps.json").to_string(), "maps.json");
    }
}
