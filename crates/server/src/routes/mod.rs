//! Route table. Every route declares its access level here and nowhere else.

pub mod classroom;
pub mod course;
pub mod health;
pub mod schedule;
pub mod user;

use crate::{
    access::{Access, guarded},
    doc::ApiDoc,
    state::AppState,
};
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use utoipa::OpenApi;

/// Routes reachable without a token
pub fn public_routes() -> Router {
    Router::new()
        .route("/health", guarded(Access::Public, get(health::health)))
        .route(
            "/openapi.json",
            guarded(Access::Public, get(|| async { Json(ApiDoc::openapi()) })),
        )
}

/// Routes that expect a [`crate::access::Caller`] in the request extensions
pub fn api_routes(state: AppState) -> Router {
    use Access::{Admin, Authenticated};

    Router::new()
        .route(
            "/schedules",
            guarded(Authenticated, get(schedule::list_drafts)),
        )
        .route(
            "/schedules/generate/{year}/{term}",
            guarded(Admin, post(schedule::generate)),
        )
        .route("/schedules/approve", guarded(Admin, post(schedule::approve)))
        .route(
            "/schedules/historical",
            guarded(Authenticated, get(schedule::list_historical))
                .merge(guarded(Admin, post(schedule::create_historical))),
        )
        .route(
            "/schedules/historical/{year}/{term}",
            guarded(Authenticated, get(schedule::get_historical)),
        )
        .route(
            "/schedules/{year}/{term}",
            guarded(Authenticated, get(schedule::get_draft))
                .merge(guarded(Admin, put(schedule::update_draft))),
        )
        .route(
            "/courses",
            guarded(Authenticated, get(course::get_courses))
                .merge(guarded(Admin, post(course::create_course))),
        )
        .route(
            "/courses/{shorthand}",
            guarded(Authenticated, get(course::get_course)).merge(guarded(
                Admin,
                put(course::update_course).delete(course::delete_course),
            )),
        )
        .route(
            "/classrooms",
            guarded(Authenticated, get(classroom::get_classrooms))
                .merge(guarded(Admin, post(classroom::create_classroom))),
        )
        .route(
            "/classrooms/{building}/{room}",
            guarded(Authenticated, get(classroom::get_classroom)).merge(guarded(
                Admin,
                put(classroom::update_classroom)
                    .delete(classroom::delete_classroom),
            )),
        )
        .route(
            "/users",
            guarded(Admin, get(user::get_users).post(user::create_user)),
        )
        .route(
            "/users/{username}",
            guarded(Authenticated, get(user::get_user)).merge(guarded(
                Admin,
                put(user::update_user).delete(user::delete_user),
            )),
        )
        .with_state(state)
}
