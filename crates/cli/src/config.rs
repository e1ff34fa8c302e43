//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use datespan_core::{ConfigError, DateOrder, ParserConfig, TimeZoneSpec};

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# datespan configuration
# See: datespan --help for all options

# Zone used to read "now": "local", "utc", or an IANA name like "Europe/Stockholm"
tz = "local"

# Require the input length to match the template exactly
strict = true

# Split "A to B" style input into a range
periods = true

# Return single dates as a period covering the whole day
always_period = true

# Read 03/04/2020 as April 3 when templates are otherwise equally specific
day_first = false

# Disable colored output
no_color = false

# Template skeletons using {d}, {m}, {y}, {t} and optional [literals]
# skeletons = ["{m} {d}", "{d} [Of] {m}", "{m} {d} {y}", "{d} [Of] {m} {y}"]
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tz: Option<String>,
    pub strict: Option<bool>,
    pub periods: Option<bool>,
    pub always_period: Option<bool>,
    pub day_first: Option<bool>,
    pub no_color: Option<bool>,
    pub skeletons: Option<Vec<String>>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux/macOS: `~/.config/datespan/config.toml`
    /// - Windows: `%APPDATA%\datespan\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("datespan").join("config.toml"))
    }

    /// Load config from file. Returns default if file doesn't exist.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Get tz with precedence: env > config > default.
    pub fn tz(&self) -> Result<TimeZoneSpec, ConfigError> {
        std::env::var("DATESPAN_TZ")
            .ok()
            .or_else(|| self.tz.clone())
            .map_or(Ok(TimeZoneSpec::Local), |tz| tz.parse())
    }

    /// Get strict with precedence: env > config > default.
    pub fn strict(&self) -> bool {
        Self::env_var("DATESPAN_STRICT")
            .or(self.strict)
            .unwrap_or(true)
    }

    /// Get periods with precedence: env > config > default.
    pub fn periods(&self) -> bool {
        Self::env_var("DATESPAN_PERIODS")
            .or(self.periods)
            .unwrap_or(true)
    }

    /// Get always_period with precedence: env > config > default.
    pub fn always_period(&self) -> bool {
        Self::env_var("DATESPAN_ALWAYS_PERIOD")
            .or(self.always_period)
            .unwrap_or(true)
    }

    /// Get day_first with precedence: env > config > default.
    pub fn day_first(&self) -> bool {
        Self::env_var("DATESPAN_DAY_FIRST")
            .or(self.day_first)
            .unwrap_or(false)
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("DATESPAN_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }

    /// Build the parser configuration from file and environment values.
    pub fn parser_config(&self) -> Result<ParserConfig, ConfigError> {
        let date_order = if self.day_first() {
            DateOrder::DayFirst
        } else {
            DateOrder::MonthFirst
        };
        let mut config = ParserConfig::default()
            .with_tz(self.tz()?)
            .with_strict(self.strict())
            .with_periods(self.periods())
            .with_always_period(self.always_period())
            .with_date_order(date_order);
        if let Some(skeletons) = &self.skeletons {
            config = config.with_skeletons(skeletons.iter().cloned());
        }
        Ok(config)
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;

    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(&path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_toml() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).expect("DEFAULT_CONFIG should parse");
        assert_eq!(config.tz.as_deref(), Some("local"));
        assert_eq!(config.strict, Some(true));
        assert_eq!(config.periods, Some(true));
        assert_eq!(config.always_period, Some(true));
        assert_eq!(config.day_first, Some(false));
        assert_eq!(config.no_color, Some(false));
        assert_eq!(config.skeletons, None);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
strict = false
tz = "Europe/Stockholm"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.strict, Some(false));
        assert_eq!(config.periods, None);

        let parser_config = config.parser_config().unwrap();
        assert_eq!(
            parser_config.tz,
            TimeZoneSpec::Named("Europe/Stockholm".parse().unwrap())
        );
        // Missing values use defaults
        assert!(parser_config.support_periods);
        assert!(parser_config.always_return_period);
    }

    #[test]
    fn test_custom_skeletons() {
        let toml = r#"
skeletons = ["{d} {m} {y}"]
day_first = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let parser_config = config.parser_config().unwrap();
        assert_eq!(parser_config.skeletons, vec!["{d} {m} {y}".to_string()]);
        assert_eq!(parser_config.date_order, DateOrder::DayFirst);
    }

    #[test]
    fn test_unknown_zone_is_an_error() {
        let config: Config = toml::from_str(r#"tz = "Nowhere/Special""#).unwrap();
        assert!(matches!(
            config.parser_config(),
            Err(ConfigError::UnknownTimeZone(_))
        ));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        let parser_config = config.parser_config().unwrap();
        assert_eq!(parser_config, ParserConfig::default());
    }
}
