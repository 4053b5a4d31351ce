use clap::Parser;
use exodo_tui::headless::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "exodo", version, about = "Êxodo fact browser")]
pub struct CliArgs {
    /// Print the selected facts and exit
    #[arg(long)]
    pub headless: bool,

    /// Headless output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Initial view state, e.g. "categoria=pessoas&busca=moises"
    #[arg(long, value_name = "STATE", default_value = "")]
    pub fragment: String,

    /// Facts catalog: path or http(s) URL
    #[arg(long, value_name = "SOURCE")]
    pub data: Option<String>,

    /// Maps catalog: path or http(s) URL
    #[arg(long, value_name = "SOURCE")]
    pub maps: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl CliArgs {
    /// Flags win over `.env` and the environment, so they are written back
    /// into the environment before the config is read.
    pub fn apply_env_overrides(&self) {
        if let Some(data) = &self.data {
            std::env::set_var("EXODO_DATA", data);
        }
        if let Some(maps) = &self.maps {
            std::env::set_var("EXODO_MAPS", maps);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("EXODO_TIMEOUT", timeout.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_interactive_text() {
        let args = CliArgs::parse_from(["exodo"]);

        assert!(!args.headless);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.fragment.is_empty());
        assert!(args.data.is_none());
    }

    #[test]
    fn parses_headless_flags() {
        let args = CliArgs::parse_from([
            "exodo",
            "--headless",
            "--format",
            "json",
            "--fragment",
            "categoria=maps",
            "--timeout",
            "3",
        ]);

        assert!(args.headless);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.fragment, "categoria=maps");
        assert_eq!(args.timeout, Some(3));
    }
}
