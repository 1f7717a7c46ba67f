// Configuration module entry point
// Loads layered configuration and resolves the CLI port override

mod types;

use std::net::SocketAddr;

pub use types::{Config, FilesConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default listening port when neither CLI argument nor configuration
/// provides one.
pub const DEFAULT_PORT: u16 = 8000;

impl Config {
    /// Load configuration from `config.toml` (optional), `ISOSERVE_*`
    /// environment variables, and coded defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the named file (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("ISOSERVE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("files.root", ".")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Parse the optional positional port argument.
///
/// Absent means "use the configured port". A present but unparseable value
/// is a startup error; nothing may be bound before this check passes.
pub fn port_override(arg: Option<&str>) -> Result<Option<u16>, String> {
    match arg {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u16>()
            .map(Some)
            .map_err(|_| format!("invalid port argument '{raw}': expected an integer in 0-65535")),
    }
}

/// Shared application state handed to every connection.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_argument_defers_to_config() {
        assert_eq!(port_override(None), Ok(None));
    }

    #[test]
    fn valid_port_is_used_verbatim() {
        assert_eq!(port_override(Some("8001")), Ok(Some(8001)));
        assert_eq!(port_override(Some("80")), Ok(Some(80)));
    }

    #[test]
    fn non_integer_port_is_a_startup_error() {
        let err = port_override(Some("http")).unwrap_err();
        assert!(err.contains("'http'"));
        assert!(port_override(Some("80 01")).is_err());
        assert!(port_override(Some("-1")).is_err());
        assert!(port_override(Some("70000")).is_err());
    }

    #[test]
    fn default_port_matches_contract() {
        assert_eq!(DEFAULT_PORT, 8000);
    }
}
