use crate::config::app::{ApplicationSettings, ApplicationSettingsModel, NAME_PORT};
use crate::config::environment::Environment;
use crate::config::scheduling::{SchedulingSettings, SchedulingSettingsModel};
use config::{Config, ConfigError};
use serde::Deserialize;
use std::env;
use tracing::{error, warn};

pub mod app;
pub mod environment;
pub mod scheduling;

const CONFIG_DIR: &str = "configuration";
const CONFIG_FILE_NAME: &str = "settings.toml";

#[derive(Deserialize)]
pub struct SettingsModel {
    pub app: Option<ApplicationSettingsModel>,
    pub scheduling: Option<SchedulingSettingsModel>,
}

impl SettingsModel {
    fn parse() -> Result<Self, ConfigError> {
        let base_path = std::env::current_dir().expect("Failed to determine the current directory");
        let config_dir = base_path.join(CONFIG_DIR);
        let settings = Config::builder()
            .add_source(config::File::from(config_dir.join(CONFIG_FILE_NAME)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        Ok(settings.build()?.try_deserialize()?)
    }
}

#[derive(Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub scheduling: SchedulingSettings,
    pub environment: Environment,
}

impl Settings {
    fn dev(model: SettingsModel) -> Self {
        let app = model.app.map_or_else(
            || {
                warn!("Using default `app` settings!");
                ApplicationSettings::default()
            },
            |x| x.to_settings(),
        );

        let scheduling = model.scheduling.map_or_else(
            || {
                warn!("Using default `scheduling` settings!");
                SchedulingSettings::default()
            },
            |x| x.to_settings(),
        );

        Self {
            app,
            scheduling,
            environment: Environment::Development,
        }
    }

    fn prod() -> Self {
        Self {
            app: ApplicationSettings::from_env(),
            scheduling: SchedulingSettings::from_env(),
            environment: Environment::Production,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: ApplicationSettings::default(),
            scheduling: SchedulingSettings::default(),
            environment: Environment::default(),
        }
    }
}

pub fn get_config() -> Result<Settings, anyhow::Error> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .map_or(Environment::Development, |env| {
            env.try_into().expect("Failed to parse APP_ENVIRONMENT.")
        });

    match environment {
        Environment::Development => {
            let res = SettingsModel::parse().map_err(|e| {
                error!("{e}\n - check {CONFIG_DIR}/{CONFIG_FILE_NAME}, reference at README.md")
            });
            if let Ok(model) = res {
                return Ok(Settings::dev(model));
            }
            let default = Settings::default();
            warn!("Using default configuration!");
            Ok(default)
        }

        Environment::Production => {
            if !is_ok_env() {
                panic!("Enter all required environment variables")
            }
            Ok(Settings::prod())
        }
    }
}

pub fn try_get_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub fn get_env(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("Missing {name}"))
}

fn is_ok_env() -> bool {
    let args: Vec<String> = env::vars().map(|(key, _)| key).collect();
    let required_variables = [NAME_PORT];
    let mut buf = vec![];
    for required_var in required_variables {
        let var = required_var.to_owned();
        if !args.contains(&var) {
            buf.push(var);
        }
    }
    if buf.is_empty() {
        return true;
    }
    error!("Provide missing environment variables {buf:?}");
    false
}
