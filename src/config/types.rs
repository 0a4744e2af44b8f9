//! The configuration structs used to build the AppConfig, and their impls.
use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::{ConfigError, ConfigResult};
use crate::web::types::ValidEmail;

/// The environment variable holding the bearer credential for the email API.
pub const API_KEY_ENV_VAR: &str = "RESEND_API_KEY";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub email_config: EmailConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct EmailConfig {
    pub url: String,
    pub sender_addr: String,
    pub recipient_addr: String,
    pub auth_token: SecretString,
}

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    /// Layers `base.toml`, the environment specific file, `APP_` prefixed variables
    /// and finally the API key variable on top of each other.
    pub fn figment(config_dir: &Path, environment: Environment) -> Figment {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&[API_KEY_ENV_VAR])
                    .map(|_| "email_config.auth_token".into()),
            )
    }

    pub fn load(config_dir: &Path, environment: Environment) -> ConfigResult<Self> {
        let config = Self::figment(config_dir, environment).extract()?;
        Ok(config)
    }
}

impl EmailConfig {
    pub fn valid_sender(&self) -> ConfigResult<ValidEmail> {
        ValidEmail::parse(&self.sender_addr)
            .map_err(|er| ConfigError::InvalidEmail(format!("{}: {er}", self.sender_addr)))
    }
    pub fn valid_recipient(&self) -> ConfigResult<ValidEmail> {
        ValidEmail::parse(&self.recipient_addr)
            .map_err(|er| ConfigError::InvalidEmail(format!("{}: {er}", self.recipient_addr)))
    }
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
