use crate::config::app::ApplicationSettings;
use crate::config::environment::Environment;
use crate::config::get_config;
use crate::config::scheduling::SchedulingSettings;
use crate::utils::scheduling::constraints::{SchedulingConstraints, WeekSchedule};
use axum::extract::FromRef;
use core::fmt::Display;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use time_tz::{TimeZone, Tz};
use tracing::{error, info};

pub struct Modules {
    pub app: ApplicationSettings,
    scheduling: SchedulingSettings,
    environment: Environment,
}

impl Modules {
    pub fn load_from_settings() -> Self {
        let settings = get_config()
            .map_err(|e| error!("Failed to load settings {e:#?}"))
            .unwrap();
        info!("Settings loaded");
        Self {
            app: settings.app,
            scheduling: settings.scheduling,
            environment: settings.environment,
        }
    }

    pub fn use_custom(
        addr: SocketAddr,
        scheduling: SchedulingSettings,
        environment: Environment,
    ) -> Self {
        Self {
            app: ApplicationSettings::new(addr),
            scheduling,
            environment,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub environment: Environment,
    pub scheduler: SchedulerState,
}

impl AppState {
    fn new(modules: &Modules) -> Self {
        Self {
            environment: modules.environment.clone(),
            scheduler: SchedulerState::new(modules.scheduling.clone()),
        }
    }
}

impl Display for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "scheduling engine in {}", self.scheduler.timezone().name())
    }
}

/// Shared scheduling configuration. Updates swap the whole constraints
/// record, so each validation run works from one consistent snapshot.
#[derive(Clone)]
pub struct SchedulerState {
    tz: &'static Tz,
    hours: WeekSchedule,
    constraints: Arc<RwLock<SchedulingConstraints>>,
}

impl SchedulerState {
    fn new(settings: SchedulingSettings) -> Self {
        Self {
            tz: settings.tz,
            hours: settings.hours,
            constraints: Arc::new(RwLock::new(settings.constraints)),
        }
    }

    pub fn timezone(&self) -> &'static Tz {
        self.tz
    }

    pub fn week_schedule(&self) -> &WeekSchedule {
        &self.hours
    }

    pub fn constraints(&self) -> SchedulingConstraints {
        self.constraints
            .read()
            .expect("constraints lock poisoned")
            .clone()
    }

    pub fn replace_constraints(&self, next: SchedulingConstraints) {
        *self
            .constraints
            .write()
            .expect("constraints lock poisoned") = next;
    }
}
