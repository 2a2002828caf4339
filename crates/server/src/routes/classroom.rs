use crate::{
    error::{ApiError, AppResult},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use models::{
    classroom::{Classroom, ClassroomKey},
    patch::merge_fields,
};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/classrooms",
    responses(
        (status = 200, description = "List of classrooms", body = Vec<Classroom>)
    ),
    security(("jwt" = [])),
    tag = "Classrooms"
)]
pub async fn get_classrooms(State(state): State<AppState>) -> AppResult<Json<Vec<Classroom>>> {
    Ok(Json(state.catalog.list_classrooms().await?))
}

#[utoipa::path(
    get,
    path = "/classrooms/{building}/{room}",
    params(
        ("building" = String, Path, description = "Building shorthand, e.g. ECS"),
        ("room" = String, Path, description = "Room number, e.g. 104")
    ),
    responses(
        (status = 200, description = "Classroom found", body = Classroom),
        (status = 404, description = "Classroom not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Classrooms"
)]
pub async fn get_classroom(
    State(state): State<AppState>,
    Path((building, room)): Path<(String, String)>,
) -> AppResult<Json<Classroom>> {
    let key = ClassroomKey::new(building, room);
    Ok(Json(state.catalog.get_classroom(&key).await?))
}

/// Add a classroom; a (building, room) pair can only be added once
#[utoipa::path(
    post,
    path = "/classrooms",
    request_body = Classroom,
    responses(
        (status = 201, description = "Classroom created", body = Classroom),
        (status = 400, description = "Malformed classroom", body = ApiError),
        (status = 409, description = "Classroom already exists", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Classrooms"
)]
pub async fn create_classroom(
    State(state): State<AppState>,
    payload: Result<Json<Classroom>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Classroom>)> {
    let Json(classroom) = payload?;
    state.catalog.insert_classroom(&classroom).await?;
    Ok((StatusCode::CREATED, Json(classroom)))
}

#[utoipa::path(
    put,
    path = "/classrooms/{building}/{room}",
    params(
        ("building" = String, Path, description = "Building shorthand"),
        ("room" = String, Path, description = "Room number")
    ),
    request_body(content = Object, description = "Top-level fields to replace"),
    responses(
        (status = 200, description = "Updated classroom", body = Classroom),
        (status = 400, description = "Malformed or disallowed update", body = ApiError),
        (status = 404, description = "Classroom not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Classrooms"
)]
pub async fn update_classroom(
    State(state): State<AppState>,
    Path((building, room)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Classroom>> {
    let Json(patch) = payload?;
    let current = state
        .catalog
        .get_classroom(&ClassroomKey::new(building, room))
        .await?;
    let updated = merge_fields(&current, &patch, Classroom::PROTECTED_FIELDS)?;

    state.catalog.replace_classroom(&updated).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/classrooms/{building}/{room}",
    params(
        ("building" = String, Path, description = "Building shorthand"),
        ("room" = String, Path, description = "Room number")
    ),
    responses(
        (status = 204, description = "Classroom deleted"),
        (status = 404, description = "Classroom not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Classrooms"
)]
pub async fn delete_classroom(
    State(state): State<AppState>,
    Path((building, room)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state
        .catalog
        .delete_classroom(&ClassroomKey::new(building, room))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
