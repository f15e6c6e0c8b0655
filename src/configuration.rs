use std::time::Duration;

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

const API_KEY_ENV_VAR: &str = "EXA_API_KEY";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub exa: ExaSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct ExaSettings {
    pub api_key: String,
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub poll_interval_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ExaSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_milliseconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("exa.api_key", std::env::var(API_KEY_ENV_VAR).ok())?
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

impl Settings {
    /// Refuses to start without a provider key.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.exa.api_key.trim().is_empty() {
            return Err(config::ConfigError::Message(format!(
                "{} environment variable is required",
                API_KEY_ENV_VAR
            )));
        }

        Ok(())
    }
}
