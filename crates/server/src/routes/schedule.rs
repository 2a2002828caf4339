use crate::{
    error::{ApiError, AppResult},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use models::schedule::{Lifecycle, Schedule};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Identifies the draft to approve
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveRequest {
    pub year: i32,
    #[schema(example = "fall")]
    pub term: String,
}

/// Generate a draft schedule for a year and term
#[utoipa::path(
    post,
    path = "/schedules/generate/{year}/{term}",
    params(
        ("year" = String, Path, description = "Academic year, e.g. 2025"),
        ("term" = String, Path, description = "fall, spring or summer (any case)")
    ),
    responses(
        (status = 201, description = "Draft schedule generated and stored", body = Schedule),
        (status = 400, description = "Invalid year or term", body = ApiError),
        (status = 409, description = "A draft already exists for this year and term", body = ApiError),
        (status = 502, description = "Timetable generation service failed", body = ApiError),
        (status = 504, description = "Generation did not finish in time", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn generate(
    State(state): State<AppState>,
    Path((year, term)): Path<(String, String)>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    let schedule = state.schedules.generate_schedule(&year, &term).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Approve the draft schedule for a year and term
#[utoipa::path(
    post,
    path = "/schedules/approve",
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "Draft moved to the historical schedules", body = Schedule),
        (status = 400, description = "Malformed body or invalid term", body = ApiError),
        (status = 404, description = "No draft for this year and term", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn approve(
    State(state): State<AppState>,
    payload: Result<Json<ApproveRequest>, JsonRejection>,
) -> AppResult<Json<Schedule>> {
    let Json(request) = payload?;
    let schedule = state
        .schedules
        .approve_schedule(request.year, &request.term)
        .await?;
    Ok(Json(schedule))
}

/// List draft schedules
#[utoipa::path(
    get,
    path = "/schedules",
    responses((status = 200, description = "All draft schedules", body = Vec<Schedule>)),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn list_drafts(State(state): State<AppState>) -> AppResult<Json<Vec<Schedule>>> {
    Ok(Json(state.schedules.list_schedules(Lifecycle::Draft).await?))
}

/// Get the draft schedule for a year and term
#[utoipa::path(
    get,
    path = "/schedules/{year}/{term}",
    params(
        ("year" = String, Path, description = "Academic year"),
        ("term" = String, Path, description = "fall, spring or summer")
    ),
    responses(
        (status = 200, description = "Draft schedule", body = Schedule),
        (status = 404, description = "No draft for this year and term", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn get_draft(
    State(state): State<AppState>,
    Path((year, term)): Path<(String, String)>,
) -> AppResult<Json<Schedule>> {
    let schedule = state
        .schedules
        .get_schedule(Lifecycle::Draft, &year, &term)
        .await?;
    Ok(Json(schedule))
}

/// Update fields of a draft schedule
#[utoipa::path(
    put,
    path = "/schedules/{year}/{term}",
    params(
        ("year" = String, Path, description = "Academic year"),
        ("term" = String, Path, description = "fall, spring or summer")
    ),
    request_body(content = Object, description = "Top-level fields to replace"),
    responses(
        (status = 200, description = "Updated draft schedule", body = Schedule),
        (status = 400, description = "Malformed or disallowed update", body = ApiError),
        (status = 404, description = "No draft for this year and term", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn update_draft(
    State(state): State<AppState>,
    Path((year, term)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Schedule>> {
    let Json(patch) = payload?;
    let schedule = state.schedules.update_draft(&year, &term, &patch).await?;
    Ok(Json(schedule))
}

/// List approved schedules
#[utoipa::path(
    get,
    path = "/schedules/historical",
    responses((status = 200, description = "All approved schedules", body = Vec<Schedule>)),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn list_historical(State(state): State<AppState>) -> AppResult<Json<Vec<Schedule>>> {
    Ok(Json(state.schedules.list_schedules(Lifecycle::Approved).await?))
}

/// Get the approved schedule for a year and term
#[utoipa::path(
    get,
    path = "/schedules/historical/{year}/{term}",
    params(
        ("year" = String, Path, description = "Academic year"),
        ("term" = String, Path, description = "fall, spring or summer")
    ),
    responses(
        (status = 200, description = "Approved schedule", body = Schedule),
        (status = 404, description = "No approved schedule for this year and term", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn get_historical(
    State(state): State<AppState>,
    Path((year, term)): Path<(String, String)>,
) -> AppResult<Json<Schedule>> {
    let schedule = state
        .schedules
        .get_schedule(Lifecycle::Approved, &year, &term)
        .await?;
    Ok(Json(schedule))
}

/// Record a schedule from a previous year as approved
#[utoipa::path(
    post,
    path = "/schedules/historical",
    request_body = Schedule,
    responses(
        (status = 201, description = "Schedule recorded", body = Schedule),
        (status = 400, description = "Malformed schedule", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn create_historical(
    State(state): State<AppState>,
    payload: Result<Json<Schedule>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    let Json(schedule) = payload?;
    let schedule = state.schedules.create_historical(schedule).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}
