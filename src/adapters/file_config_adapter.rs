//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[sqlite]
path = stocks.db
pool_size = 2

[universe]
tickers = KO, NVDA, SPY

[ingest]
lookback_days = 180
delay_ms = 0

[scoring]
adx_strong = 30
"#;

    #[test]
    fn from_string_reads_sections() {
        let config = FileConfigAdapter::from_string(SAMPLE).unwrap();

        assert_eq!(
            config.get_string("sqlite", "path"),
            Some("stocks.db".to_string())
        );
        assert_eq!(config.get_int("sqlite", "pool_size", 4), 2);
        assert_eq!(config.get_double("scoring", "adx_strong", 25.0), 30.0);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = FileConfigAdapter::from_string(SAMPLE).unwrap();

        assert_eq!(config.get_string("sqlite", "nope"), None);
        assert_eq!(config.get_int("ingest", "nope", 365), 365);
        assert_eq!(config.get_double("scoring", "nope", 0.02), 0.02);
        assert!(config.get_bool("nope", "nope", true));
    }

    #[test]
    fn bool_parsing_variants() {
        let config =
            FileConfigAdapter::from_string("[flags]\na = yes\nb = 0\nc = maybe\n").unwrap();

        assert!(config.get_bool("flags", "a", false));
        assert!(!config.get_bool("flags", "b", true));
        // unparseable → default
        assert!(config.get_bool("flags", "c", true));
    }

    #[test]
    fn from_file_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let config = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(config.get_int("ingest", "lookback_days", 365), 180);
    }

    #[test]
    fn from_file_missing_path_errors() {
        assert!(FileConfigAdapter::from_file("/no/such/config.ini").is_err());
    }
}
