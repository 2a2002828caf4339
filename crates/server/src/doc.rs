use crate::{
    error::ApiError,
    routes::{classroom, course, health, schedule, user},
};
use models::{
    classroom::Classroom,
    course::Course,
    requisite::RequisiteGroups,
    schedule::{CourseOffering, Schedule, Section, TermSchedule},
    user::{TimeInterval, User},
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        schedule::generate,
        schedule::approve,
        schedule::list_drafts,
        schedule::get_draft,
        schedule::update_draft,
        schedule::list_historical,
        schedule::get_historical,
        schedule::create_historical,
        course::get_courses,
        course::get_course,
        course::create_course,
        course::update_course,
        course::delete_course,
        classroom::get_classrooms,
        classroom::get_classroom,
        classroom::create_classroom,
        classroom::update_classroom,
        classroom::delete_classroom,
        user::get_users,
        user::get_user,
        user::create_user,
        user::update_user,
        user::delete_user
    ),
    components(schemas(
        ApiError,
        schedule::ApproveRequest,
        Schedule,
        TermSchedule,
        CourseOffering,
        Section,
        Course,
        RequisiteGroups,
        Classroom,
        User,
        TimeInterval
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Schedules", description = "Schedule generation, approval and history"),
        (name = "Courses", description = "Course catalog"),
        (name = "Classrooms", description = "Rooms available for scheduling"),
        (name = "Users", description = "Users and instructor preferences"),
    ),
    info(
        title = "Scheduling API",
        version = "1.0.0",
        description = "Academic term scheduling backend",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
