use async_trait::async_trait;
use axum::{
    Extension, Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use database::{CatalogStore, MemoryStore};
use models::{
    course::Course,
    schedule::{CourseOffering, Schedule, Section},
    term::Term,
};
use scheduler::{
    CapacityEstimator, CapacityOutcome, ScheduleManager, SchedulingError, SchedulingResult,
    TimetableGenerator, generation::GenerationInput,
};
use serde_json::{Value, json};
use server::{access::Caller, app, protected_routes, state::AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

struct Unavailable;

#[async_trait]
impl CapacityEstimator for Unavailable {
    async fn estimate(&self, _: i32, _: Term, _: &[Course]) -> CapacityOutcome {
        CapacityOutcome::Fallback
    }
}

struct OneSection {
    fail: bool,
}

#[async_trait]
impl TimetableGenerator for OneSection {
    async fn generate(&self, input: GenerationInput<'_>) -> SchedulingResult<Vec<CourseOffering>> {
        if self.fail {
            return Err(SchedulingError::GenerationService("service responded with 500".into()));
        }

        Ok(input
            .courses
            .iter()
            .map(|c| CourseOffering {
                course: c.course.clone(),
                sections: vec![Section {
                    num: "A01".to_string(),
                    building: "ECS".to_string(),
                    room: "104".to_string(),
                    professor: "rich".to_string(),
                    days: vec!["Monday".to_string()],
                    num_seats: 120,
                    num_enroll: 0,
                    start_time: "10:00".to_string(),
                    end_time: "11:20".to_string(),
                }],
            })
            .collect())
    }
}

struct TestApp {
    store: Arc<MemoryStore>,
    state: AppState,
}

impl TestApp {
    async fn new(generator_fails: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let course: Course = serde_json::from_value(json!({
            "shorthand": "CSC225",
            "name": "Algorithms and Data Structures II",
            "prerequisites": [["CSC115"]],
            "terms_offered": ["fall"],
        }))
        .unwrap();
        store.insert_course(&course).await.unwrap();

        let manager = ScheduleManager::new(
            store.clone(),
            store.clone(),
            Arc::new(Unavailable),
            Arc::new(OneSection {
                fail: generator_fails,
            }),
        );
        let state = AppState::new(store.clone(), manager);
        Self { store, state }
    }

    fn router(&self, caller: Option<Caller>) -> Router {
        let api = protected_routes(self.state.clone());
        match caller {
            Some(caller) => app(api.layer(Extension(caller))),
            None => app(api),
        }
    }

    async fn send(&self, caller: Option<Caller>, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(serde_json::to_vec(&body).unwrap()),
                None => Body::empty(),
            })
            .unwrap();

        let response = self.router(caller).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

fn admin() -> Option<Caller> {
    Some(Caller::new("rich", true))
}

fn member(name: &str) -> Option<Caller> {
    Some(Caller::new(name, false))
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new(false).await;
    let response = app
        .router(None)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_access_levels() {
    let app = TestApp::new(false).await;

    let (status, body) = app.send(None, "GET", "/schedules", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = app.send(member("celina"), "GET", "/schedules", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(member("celina"), "POST", "/schedules/generate/2025/fall", None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(app.store.writes(), 1);

    let (status, _) = app
        .send(None, "POST", "/schedules/generate/2025/fall", None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_generate_approve_flow() {
    let app = TestApp::new(false).await;

    let (status, draft) = app
        .send(admin(), "POST", "/schedules/generate/2025/Fall", None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(draft["terms"][0]["term"], "Fall");
    assert_eq!(draft["terms"][0]["courses"][0]["course"], "CSC225");

    let (status, _) = app
        .send(admin(), "POST", "/schedules/generate/2025/fall", None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, fetched) = app.send(member("celina"), "GET", "/schedules/2025/fall", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, draft);

    let approve = json!({"year": 2025, "term": "Fall"});
    let (status, approved) = app
        .send(admin(), "POST", "/schedules/approve", Some(approve.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved, draft);

    let (status, _) = app
        .send(admin(), "POST", "/schedules/approve", Some(approve))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(member("celina"), "GET", "/schedules/2025/fall", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, historical) = app
        .send(member("celina"), "GET", "/schedules/historical", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let historical: Vec<Schedule> = serde_json::from_value(historical).unwrap();
    assert_eq!(historical.len(), 1);
}

#[tokio::test]
async fn test_invalid_term_and_year_are_bad_requests() {
    let app = TestApp::new(false).await;
    let writes = app.store.writes();

    let (status, body) = app
        .send(admin(), "POST", "/schedules/generate/2025/winter", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_TERM");

    let (status, body) = app
        .send(admin(), "POST", "/schedules/generate/next/fall", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_YEAR");

    let (status, _) = app
        .send(admin(), "POST", "/schedules/approve", Some(json!({"year": 2025, "term": "autumn"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.store.writes(), writes);
}

#[tokio::test]
async fn test_generation_failure_is_bad_gateway() {
    let app = TestApp::new(true).await;

    let (_, before) = app.send(admin(), "GET", "/schedules", None).await;
    let (status, body) = app
        .send(admin(), "POST", "/schedules/generate/2025/fall", None)
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "GENERATION_FAILED");

    let (_, after) = app.send(admin(), "GET", "/schedules", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_duplicate_classroom_is_conflict() {
    let app = TestApp::new(false).await;
    let room = json!({"building": "ECS", "room": "104", "capacity": 120});

    let (status, _) = app
        .send(admin(), "POST", "/classrooms", Some(room.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.send(admin(), "POST", "/classrooms", Some(room)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (status, _) = app
        .send(
            admin(),
            "POST",
            "/classrooms",
            Some(json!({"building": "ECS", "room": "108", "capacity": -1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, rooms) = app.send(member("celina"), "GET", "/classrooms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rooms.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_course_rules() {
    let app = TestApp::new(false).await;

    let (status, _) = app
        .send(admin(), "POST", "/courses", Some(json!({"shorthand": "CSC22", "name": "Bad"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(admin(), "PUT", "/courses/CSC225", Some(json!({"shorthand": "CSC226"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            admin(),
            "POST",
            "/courses",
            Some(json!({"shorthand": "CSC226", "name": "Algorithms III", "prerequisites": [["CSC226"]]})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _) = app
        .send(admin(), "PUT", "/courses/CSC225", Some(json!({"corequisites": [["MATH"]]})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, course) = app
        .send(admin(), "PUT", "/courses/CSC225", Some(json!({"terms_offered": ["spring"]})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(course["terms_offered"], json!(["spring"]));

    let (status, _) = app.send(admin(), "DELETE", "/courses/CSC225", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(member("celina"), "GET", "/courses/CSC225", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_rules() {
    let app = TestApp::new(false).await;

    let (status, user) = app
        .send(
            admin(),
            "POST",
            "/users",
            Some(json!({"username": "celina", "email": "celina@uvic.ca", "isAdmin": true})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["isAdmin"], false);

    let (status, _) = app.send(member("celina"), "GET", "/users/celina", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(member("bob"), "GET", "/users/celina", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(member("celina"), "GET", "/users", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(admin(), "PUT", "/users/celina", Some(json!({"isAdmin": true})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            admin(),
            "PUT",
            "/users/celina",
            Some(json!({"availability": {"monday": [{"start": "12:00:00", "end": "09:00:00"}]}})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = app
        .send(admin(), "PUT", "/users/celina", Some(json!({"qualifications": ["CSC225"]})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["qualifications"], json!(["CSC225"]));
}
