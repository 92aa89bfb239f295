//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: text, json")]
    InvalidLogFormat(String),

    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    #[error("Invalid rate units: {0}. Must be one of: auto, fraction, percent")]
    InvalidRateUnits(String),

    #[error("Invalid max payoff steps: {0}. Must be at least 1")]
    InvalidMaxPayoffSteps(usize),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Unit convention for volatility, rate and dividend yield in requests
///
/// The analytics always work in fractions (0.05 = 5%). Clients may send
/// either convention; this setting decides how request values are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateUnits {
    /// Values strictly above 1.0 are percentages; 1.0 and below are fractions
    #[default]
    Auto,
    /// Values are fractions and pass through unchanged
    Fraction,
    /// Values are percentages and are always divided by 100
    Percent,
}

impl RateUnits {
    /// Convert a request value to a fraction
    ///
    /// # Examples
    /// ```
    /// use pricer_server::config::RateUnits;
    ///
    /// assert_eq!(RateUnits::Auto.to_fraction(20.0), 0.2);
    /// assert_eq!(RateUnits::Auto.to_fraction(0.2), 0.2);
    /// assert_eq!(RateUnits::Auto.to_fraction(1.0), 1.0);
    /// assert_eq!(RateUnits::Percent.to_fraction(0.5), 0.005);
    /// assert_eq!(RateUnits::Fraction.to_fraction(20.0), 20.0);
    /// ```
    pub fn to_fraction(&self, value: f64) -> f64 {
        match self {
            RateUnits::Auto if value > 1.0 => value / 100.0,
            RateUnits::Auto | RateUnits::Fraction => value,
            RateUnits::Percent => value / 100.0,
        }
    }
}

impl FromStr for RateUnits {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(RateUnits::Auto),
            "fraction" | "decimal" => Ok(RateUnits::Fraction),
            "percent" | "percentage" => Ok(RateUnits::Percent),
            _ => Err(ConfigError::InvalidRateUnits(s.to_string())),
        }
    }
}

impl std::fmt::Display for RateUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateUnits::Auto => write!(f, "auto"),
            RateUnits::Fraction => write!(f, "fraction"),
            RateUnits::Percent => write!(f, "percent"),
        }
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    /// Log output format
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_format: LogFormat,
    /// Environment (development, staging, production)
    #[serde(deserialize_with = "deserialize_from_str")]
    pub environment: Environment,
    /// How volatility, rate and dividend yield values are read
    #[serde(deserialize_with = "deserialize_from_str")]
    pub rate_units: RateUnits,
    /// Largest grid accepted by the payoff endpoint
    pub max_payoff_steps: usize,
    /// Whether to allow cross-origin requests from any origin
    pub cors_permissive: bool,
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr<Err = ConfigError>,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            environment: Environment::Development,
            rate_units: RateUnits::Auto,
            max_payoff_steps: 10_000,
            cors_permissive: true,
        }
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{} has invalid value {:?}", name, value)))
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overwrite fields whose `PRICER_*` variable is set
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("PRICER_SERVER_HOST") {
            self.host = host;
        }

        if let Ok(port) = std::env::var("PRICER_SERVER_PORT") {
            self.port = parse_env("PRICER_SERVER_PORT", &port)?;
        }

        if let Ok(log_level) = std::env::var("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&log_level)?;
        }

        if let Ok(log_format) = std::env::var("PRICER_LOG_FORMAT") {
            self.log_format = LogFormat::from_str(&log_format)?;
        }

        if let Ok(env) = std::env::var("PRICER_ENV") {
            self.environment = Environment::from_str(&env)?;
        }

        if let Ok(units) = std::env::var("PRICER_RATE_UNITS") {
            self.rate_units = RateUnits::from_str(&units)?;
        }

        if let Ok(steps) = std::env::var("PRICER_MAX_PAYOFF_STEPS") {
            self.max_payoff_steps = parse_env("PRICER_MAX_PAYOFF_STEPS", &steps)?;
        }

        if let Ok(cors) = std::env::var("PRICER_CORS_PERMISSIVE") {
            self.cors_permissive = parse_env("PRICER_CORS_PERMISSIVE", &cors.to_lowercase())?;
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }

        if self.max_payoff_steps == 0 {
            return Err(ConfigError::InvalidMaxPayoffSteps(self.max_payoff_steps));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(log_format) = &cli.log_format {
            self.log_format = LogFormat::from_str(log_format)?;
        }
        if let Some(rate_units) = &cli.rate_units {
            self.rate_units = RateUnits::from_str(rate_units)?;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Log format override
    pub log_format: Option<String>,
    /// Rate units override
    pub rate_units: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.rate_units, RateUnits::Auto);
        assert_eq!(config.max_payoff_steps, 10_000);
        assert!(config.cors_permissive);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("TEXT").unwrap(), LogFormat::Text);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str("development").unwrap(),
            Environment::Development
        );
        assert_eq!(
            Environment::from_str("dev").unwrap(),
            Environment::Development
        );
        assert_eq!(
            Environment::from_str("stage").unwrap(),
            Environment::Staging
        );
        assert_eq!(
            Environment::from_str("prod").unwrap(),
            Environment::Production
        );

        assert!(Environment::from_str("invalid").is_err());
    }

    #[test]
    fn test_rate_units_parsing() {
        assert_eq!(RateUnits::from_str("auto").unwrap(), RateUnits::Auto);
        assert_eq!(RateUnits::from_str("Fraction").unwrap(), RateUnits::Fraction);
        assert_eq!(RateUnits::from_str("PERCENT").unwrap(), RateUnits::Percent);
        assert!(matches!(
            RateUnits::from_str("bps"),
            Err(ConfigError::InvalidRateUnits(_))
        ));
    }

    #[test]
    fn test_rate_units_auto_threshold() {
        let units = RateUnits::Auto;
        assert_eq!(units.to_fraction(0.05), 0.05);
        assert_eq!(units.to_fraction(1.0), 1.0);
        assert_eq!(units.to_fraction(5.0), 0.05);
        assert_eq!(units.to_fraction(0.0), 0.0);
        assert_eq!(units.to_fraction(-3.0), -3.0);
    }

    #[test]
    fn test_rate_units_explicit() {
        assert_eq!(RateUnits::Fraction.to_fraction(25.0), 25.0);
        assert_eq!(RateUnits::Percent.to_fraction(25.0), 0.25);
        assert_eq!(RateUnits::Percent.to_fraction(1.0), 0.01);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate_port() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(config.validate().is_err());

        config.port = 8080;
        assert!(config.validate().is_ok());

        config.port = 65535;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_payoff_steps() {
        let config = ServerConfig {
            max_payoff_steps: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxPayoffSteps(0))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for level in [LogLevel::Trace, LogLevel::Info, LogLevel::Error] {
            assert_eq!(LogLevel::from_str(&level.to_string()).unwrap(), level);
        }
        for units in [RateUnits::Auto, RateUnits::Fraction, RateUnits::Percent] {
            assert_eq!(RateUnits::from_str(&units.to_string()).unwrap(), units);
        }
        assert_eq!(format!("{}", Environment::Staging), "staging");
        assert_eq!(format!("{}", LogFormat::Json), "json");
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = ServerConfig::default();
        let cli = CliArgs {
            host: Some("192.168.1.1".to_string()),
            port: Some(9000),
            log_level: Some("debug".to_string()),
            log_format: Some("json".to_string()),
            rate_units: Some("percent".to_string()),
            config_file: None,
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.host, "192.168.1.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.rate_units, RateUnits::Percent);
    }

    #[test]
    fn test_cli_args_merge_rejects_bad_value() {
        let mut config = ServerConfig::default();
        let cli = CliArgs {
            rate_units: Some("basis-points".to_string()),
            ..Default::default()
        };
        assert!(config.merge_with_cli(&cli).is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            host = "127.0.0.1"
            port = 3000
            log_level = "debug"
            log_format = "json"
            environment = "production"
            rate_units = "fraction"
            max_payoff_steps = 500
            cors_permissive = false
        "#;

        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.rate_units, RateUnits::Fraction);
        assert_eq!(config.max_payoff_steps, 500);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            port = 9000
        "#;

        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.rate_units, RateUnits::Auto);
    }

    #[test]
    fn test_toml_rejects_unknown_rate_units() {
        let result: Result<ServerConfig, _> = toml::from_str(r#"rate_units = "bps""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let result = ServerConfig::from_file(&PathBuf::from("/nonexistent/pricer.toml"));
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPort(0);
        assert!(err.to_string().contains("Invalid port"));

        let err = ConfigError::InvalidLogLevel("bad".to_string());
        assert!(err.to_string().contains("Invalid log level"));

        let err = ConfigError::InvalidRateUnits("bad".to_string());
        assert!(err.to_string().contains("auto, fraction, percent"));
    }
}
