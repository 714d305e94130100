use serde::Deserialize;
use time_tz::Tz;
use tracing::warn;

use crate::config::try_get_env;
use crate::utils::scheduling::constraints::{
    ConstraintsUpdate, SchedulingConstraints, WeekSchedule,
};
use crate::utils::time::resolve_timezone;
use crate::validation::ValidateContent;

pub const NAME_TIMEZONE: &str = "SCHEDULE_TIMEZONE";

const DEFAULT_TIMEZONE: &str = "Australia/Brisbane";

#[derive(Deserialize)]
pub struct SchedulingSettingsModel {
    pub timezone: Option<String>,
    pub constraints: Option<ConstraintsUpdate>,
    pub hours: Option<WeekSchedule>,
}

impl SchedulingSettingsModel {
    pub fn to_settings(self) -> SchedulingSettings {
        let timezone = self.timezone.unwrap_or_else(|| {
            warn!("Using default scheduling timezone");
            DEFAULT_TIMEZONE.to_string()
        });
        let constraints = match self.constraints {
            Some(update) => SchedulingConstraints::default().apply(update),
            None => {
                warn!("Using default scheduling constraints");
                SchedulingConstraints::default()
            }
        };
        let hours = self.hours.unwrap_or_else(|| {
            warn!("Using default working hours");
            WeekSchedule::default()
        });

        SchedulingSettings::new(&timezone, constraints, hours)
    }
}

#[derive(Clone)]
pub struct SchedulingSettings {
    pub tz: &'static Tz,
    pub constraints: SchedulingConstraints,
    pub hours: WeekSchedule,
}

impl SchedulingSettings {
    /// A misconfigured scheduling section is fatal at load time, before any
    /// booking is validated against it.
    pub fn new(timezone: &str, constraints: SchedulingConstraints, hours: WeekSchedule) -> Self {
        let tz = resolve_timezone(timezone).expect("Unknown scheduling timezone");
        constraints
            .validate_content()
            .expect("Invalid scheduling constraints");
        hours.validate_content().expect("Invalid working hours");

        Self {
            tz,
            constraints,
            hours,
        }
    }

    pub fn from_env() -> Self {
        let timezone =
            try_get_env(NAME_TIMEZONE).unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        Self::new(
            &timezone,
            SchedulingConstraints::default(),
            WeekSchedule::default(),
        )
    }
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_TIMEZONE,
            SchedulingConstraints::default(),
            WeekSchedule::default(),
        )
    }
}
