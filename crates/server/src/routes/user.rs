use crate::{
    access::Caller,
    error::{ApiError, AppError, AppResult},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use models::{patch::merge_fields, user::User};
use serde_json::Value;

fn check_availability(user: &User) -> AppResult<()> {
    match user.invalid_interval() {
        Some((slot, interval)) => Err(AppError::BadRequest(format!(
            "availability interval {}-{} on '{slot}' must start before it ends",
            interval.start, interval.end
        ))),
        None => Ok(()),
    }
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 403, description = "Administrator access required", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn get_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.catalog.list_users().await?))
}

/// Get a user; non-admins may only fetch their own record
#[utoipa::path(
    get,
    path = "/users/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 403, description = "Not allowed to view this user", body = ApiError),
        (status = 404, description = "User not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(username): Path<String>,
) -> AppResult<Json<User>> {
    if !caller.may_view_user(&username) {
        return Err(AppError::Forbidden);
    }

    Ok(Json(state.catalog.get_user(&username).await?))
}

/// Create a user; new users never start as administrators
#[utoipa::path(
    post,
    path = "/users",
    request_body = User,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed user", body = ApiError),
        (status = 409, description = "Username already taken", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let Json(mut user) = payload?;
    user.is_admin = false;
    check_availability(&user)?;

    state.catalog.insert_user(&user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/users/{username}",
    params(("username" = String, Path, description = "Username")),
    request_body(content = Object, description = "Top-level fields to replace"),
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Malformed or disallowed update", body = ApiError),
        (status = 404, description = "User not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<User>> {
    let Json(patch) = payload?;
    let current = state.catalog.get_user(&username).await?;
    let updated = merge_fields(&current, &patch, User::PROTECTED_FIELDS)?;
    check_availability(&updated)?;

    state.catalog.replace_user(&updated).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/users/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ApiError)
    ),
    security(("jwt" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_user(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}
