use axum::{extract::State, routing::get, Json, Router};
use tracing::info;

use crate::app_errors::AppError;
use crate::modules::{AppState, SchedulerState};
use crate::utils::scheduling::constraints::{ConstraintsUpdate, SchedulingConstraints};
use crate::validation::ValidateContent;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_constraints).patch(update_constraints))
}

/// Current scheduling constraints
#[utoipa::path(get, path = "/constraints", tag = "constraints", responses((status = 200, body = SchedulingConstraints)))]
pub async fn get_constraints(
    State(scheduler): State<SchedulerState>,
) -> Json<SchedulingConstraints> {
    Json(scheduler.constraints())
}

/// Apply a partial constraints update
#[utoipa::path(patch, path = "/constraints", tag = "constraints", request_body = ConstraintsUpdate, responses((status = 200, body = SchedulingConstraints, description = "The full record after the update")))]
pub async fn update_constraints(
    State(scheduler): State<SchedulerState>,
    Json(body): Json<ConstraintsUpdate>,
) -> Result<Json<SchedulingConstraints>, AppError> {
    // the merge builds a whole new record; the old one stays live until the
    // new one passes validation
    let next = scheduler.constraints().apply(body);
    next.validate_content()?;
    scheduler.replace_constraints(next.clone());
    info!("Scheduling constraints updated");

    Ok(Json(next))
}
