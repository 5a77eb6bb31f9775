//! Settings of the application, read from `config/settings.toml` (or the
//! file passed with `--config`) and overridden by `GASTOS_*` environment
//! variables, e.g. `GASTOS_TELEGRAM__TOKEN`.

use std::str::FromStr;

use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use engine::Currency;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
    #[serde(default)]
    pub allowed_users: Vec<u64>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_timezone() -> String {
    "America/Argentina/Buenos_Aires".to_string()
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Telegram {
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        Tz::from_str(&self.timezone).map_err(|err| {
            ConfigError::Message(format!("invalid timezone '{}': {err}", self.timezone))
        })
    }

    pub fn currency(&self) -> Result<Currency, ConfigError> {
        Currency::try_from(self.currency.as_str())
            .map_err(|err| ConfigError::Message(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Health {
    pub bind: String,
    pub port: u16,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub database: Database,
    pub telegram: Option<Telegram>,
    #[serde(default)]
    pub health: Health,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("GASTOS")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("telegram.allowed_users"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn minimal_file_uses_defaults() {
        let settings = parse(r#"database = "memory""#).unwrap();

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.database, Database::Memory);
        assert!(settings.telegram.is_none());
        assert_eq!(settings.health.bind, "0.0.0.0");
        assert_eq!(settings.health.port, 8080);
    }

    #[test]
    fn full_file_is_read() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [database]
            sqlite = "gastos.db"

            [telegram]
            token = "123:abc"
            allowed_users = [1, 2]
            timezone = "Europe/Rome"
            currency = "eur"

            [health]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.database, Database::Sqlite("gastos.db".to_string()));
        assert_eq!(settings.health.port, 9000);

        let telegram = settings.telegram.unwrap();
        assert_eq!(telegram.allowed_users, [1, 2]);
        assert_eq!(telegram.timezone().unwrap(), chrono_tz::Europe::Rome);
        assert_eq!(telegram.currency().unwrap(), Currency::Eur);
    }

    #[test]
    fn telegram_defaults_to_buenos_aires_pesos() {
        let settings = parse(
            r#"
            database = "memory"
            [telegram]
            token = "123:abc"
            "#,
        )
        .unwrap();

        let telegram = settings.telegram.unwrap();
        assert!(telegram.allowed_users.is_empty());
        assert_eq!(
            telegram.timezone().unwrap(),
            chrono_tz::America::Argentina::Buenos_Aires
        );
        assert_eq!(telegram.currency().unwrap(), Currency::Ars);
    }

    #[test]
    fn bad_timezone_and_currency_are_reported() {
        let telegram = Telegram {
            token: String::new(),
            allowed_users: Vec::new(),
            timezone: "Mars/Olympus".to_string(),
            currency: "DOGE".to_string(),
        };

        assert!(telegram.timezone().is_err());
        assert!(telegram.currency().is_err());
    }

    #[test]
    fn database_is_required() {
        assert!(parse("[app]\nlevel = \"info\"").is_err());
    }
}
