use std::env;
use std::fmt;
use thiserror::Error;

/// Port the store listens on unless `DB_PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 1433;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("unsupported DRIVER '{0}', expected postgres")]
    UnsupportedDriver(String),
    #[error("invalid DB_PORT '{0}'")]
    InvalidPort(String),
}

/// Process-wide settings, read once at startup and handed to the
/// connection factory, the ingestor and the HTTP app.
#[derive(Clone)]
pub struct Config {
    pub driver: String,
    pub server: String,
    pub database: String,
    pub user_name: String,
    pub password: String,
    pub port: u16,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let driver = required("DRIVER")?;
        if !is_postgres_driver(&driver) {
            return Err(ConfigError::UnsupportedDriver(driver));
        }

        let port = match lookup("DB_PORT").filter(|value| !value.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            driver,
            server: required("SERVER")?,
            database: required("DATABASE")?,
            user_name: required("USER_NAME")?,
            // An empty password is a legitimate setting, only absence is an error.
            password: lookup("PASSWORD").ok_or(ConfigError::Missing("PASSWORD"))?,
            port,
            bind_addr: lookup("BIND_ADDR")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("driver", &self.driver)
            .field("server", &self.server)
            .field("database", &self.database)
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

// Accepts ODBC-style braces, e.g. "{PostgreSQL}".
fn is_postgres_driver(driver: &str) -> bool {
    let name = driver
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim()
        .to_ascii_lowercase();
    name == "postgres" || name == "postgresql"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn base() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DRIVER", "postgres"),
            ("SERVER", "db.internal"),
            ("DATABASE", "hr"),
            ("USER_NAME", "loader"),
            ("PASSWORD", "s3cret"),
        ]
    }

    #[test]
    fn loads_required_values_with_defaults() {
        let config = Config::from_lookup(lookup_from(&base())).unwrap();
        assert_eq!(config.server, "db.internal");
        assert_eq!(config.database, "hr");
        assert_eq!(config.user_name, "loader");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn missing_server_is_reported_by_name() {
        let pairs: Vec<_> = base().into_iter().filter(|(k, _)| *k != "SERVER").collect();
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SERVER"));
        assert_eq!(err.to_string(), "SERVER must be set");
    }

    #[test]
    fn empty_password_is_allowed() {
        let mut pairs = base();
        pairs.retain(|(k, _)| *k != "PASSWORD");
        pairs.push(("PASSWORD", ""));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.password, "");
    }

    #[test]
    fn driver_accepts_braced_names() {
        let mut pairs = base();
        pairs[0] = ("DRIVER", "{PostgreSQL}");
        assert!(Config::from_lookup(lookup_from(&pairs)).is_ok());
    }

    #[test]
    fn rejects_other_drivers() {
        let mut pairs = base();
        pairs[0] = ("DRIVER", "{ODBC Driver 18 for SQL Server}");
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDriver(_)));
    }

    #[test]
    fn port_and_bind_overrides() {
        let mut pairs = base();
        pairs.push(("DB_PORT", "5432"));
        pairs.push(("BIND_ADDR", "0.0.0.0:9000"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.port, 5432);
        assert_eq!(config.bind_addr, "0.0.0.0:9000");

        let mut pairs = base();
        pairs.push(("DB_PORT", "not-a-port"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("not-a-port".to_string()));
    }

    #[test]
    fn debug_output_hides_password() {
        let config = Config::from_lookup(lookup_from(&base())).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
