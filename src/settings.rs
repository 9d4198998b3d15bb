use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

use crate::status_fetcher::RedirectPolicy;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub url: String,
    pub expected_status: u16,
    pub log: LogSettings,
    pub redirect: RedirectSettings,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct LogSettings {
    #[serde_as(as = "DisplayFromStr")]
    pub level: tracing::Level,
}

#[derive(Debug, Deserialize)]
pub struct RedirectSettings {
    pub follow: bool,
    pub max: usize,
}

impl Settings {
    pub fn load(filename: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Config::builder()
            .set_default("url", "https://example.com")?
            .set_default("expected_status", "200")?
            .set_default("log.level", "warn")?
            .set_default("redirect.follow", "true")?
            .set_default("redirect.max", "20")?;

        if let Some(filename) = filename {
            config = config.add_source(File::new(filename, FileFormat::Toml).required(true))
        }

        config
            .add_source(
                Environment::with_prefix("STATUS_CHECK")
                    .separator("__")
                    .prefix_separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

impl RedirectSettings {
    pub fn policy(&self) -> RedirectPolicy {
        if self.follow {
            RedirectPolicy::Follow { max: self.max }
        } else {
            RedirectPolicy::Manual
        }
    }
}
