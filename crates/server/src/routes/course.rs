use crate::{
    error::{ApiError, AppError, AppResult},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use models::{
    course::{Course, is_valid_shorthand},
    patch::merge_fields,
};
use serde_json::Value;

fn check_requisites(course: &Course) -> AppResult<()> {
    match course.invalid_requisite() {
        Some(req) => Err(AppError::BadRequest(format!(
            "requisite '{req}' of {} is not a valid course (prerequisites: {}; corequisites: {})",
            course.shorthand, course.prerequisites, course.corequisites
        ))),
        None => Ok(()),
    }
}

/// Get all courses in the catalog
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = Vec<Course>),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn get_courses(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    Ok(Json(state.catalog.list_courses().await?))
}

/// Get a specific course by shorthand
#[utoipa::path(
    get,
    path = "/courses/{shorthand}",
    params(
        ("shorthand" = String, Path, description = "Course shorthand, e.g. CSC225")
    ),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 404, description = "Course not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(shorthand): Path<String>,
) -> AppResult<Json<Course>> {
    Ok(Json(state.catalog.get_course(&shorthand).await?))
}

/// Add a course to the catalog
#[utoipa::path(
    post,
    path = "/courses",
    request_body = Course,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Malformed course, shorthand or requisite", body = ApiError),
        (status = 409, description = "Shorthand already in use", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<Course>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Course>)> {
    let Json(course) = payload?;
    if !is_valid_shorthand(&course.shorthand) {
        return Err(AppError::BadRequest(format!(
            "invalid course shorthand '{}'",
            course.shorthand
        )));
    }
    check_requisites(&course)?;

    state.catalog.insert_course(&course).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Update fields of a course; the shorthand cannot change
#[utoipa::path(
    put,
    path = "/courses/{shorthand}",
    params(
        ("shorthand" = String, Path, description = "Course shorthand")
    ),
    request_body(content = Object, description = "Top-level fields to replace"),
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 400, description = "Malformed or disallowed update", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(shorthand): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Course>> {
    let Json(patch) = payload?;
    let current = state.catalog.get_course(&shorthand).await?;
    let updated = merge_fields(&current, &patch, Course::PROTECTED_FIELDS)?;
    check_requisites(&updated)?;

    state.catalog.replace_course(&updated).await?;
    Ok(Json(updated))
}

/// Remove a course from the catalog
#[utoipa::path(
    delete,
    path = "/courses/{shorthand}",
    params(
        ("shorthand" = String, Path, description = "Course shorthand")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(shorthand): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_course(&shorthand).await?;
    Ok(StatusCode::NO_CONTENT)
}
