use axum::{Json, Router, http::StatusCode, routing::post};
use database::{CatalogStore, MemoryStore};
use models::{classroom::Classroom, course::Course, schedule::Lifecycle};
use scheduler::{
    HttpCapacityClient, HttpGenerationClient, ScheduleManager, SchedulingError,
    assembly::{FALLBACK_ENROLLMENT_BAND, SeededSampler},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn section() -> Value {
    json!({
        "num": "A01",
        "building": "ECS",
        "room": "104",
        "professor": "rich",
        "days": ["Tuesday", "Friday"],
        "num_seats": 120,
        "num_enroll": 0,
        "start_time": "08:30",
        "end_time": "09:50"
    })
}

async fn catalog() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let course: Course = serde_json::from_value(json!({
        "shorthand": "CSC225",
        "name": "Algorithms and Data Structures II",
        "prerequisites": [["CSC115"]],
        "terms_offered": ["fall", "spring"],
    }))
    .unwrap();
    store.insert_course(&course).await.unwrap();

    let summer_only: Course = serde_json::from_value(json!({
        "shorthand": "SENG499",
        "name": "Design Project II",
        "terms_offered": ["summer"],
    }))
    .unwrap();
    store.insert_course(&summer_only).await.unwrap();

    store
        .insert_classroom(&Classroom {
            building: "ECS".to_string(),
            room: "104".to_string(),
            capacity: 120,
            equipment: Default::default(),
        })
        .await
        .unwrap();
    store
}

fn manager(store: Arc<MemoryStore>, base: &str) -> ScheduleManager {
    let client = reqwest::Client::new();
    ScheduleManager::new(
        store.clone(),
        store,
        Arc::new(HttpCapacityClient::new(client.clone(), format!("{base}/estimate"))),
        Arc::new(HttpGenerationClient::new(client, format!("{base}/generate"))),
    )
    .with_sampler(Arc::new(SeededSampler::new(499)))
}

#[tokio::test]
async fn test_fall_schedule_for_csc225() {
    let generated = Arc::new(Mutex::new(Value::Null));
    let recorder = generated.clone();
    let base = serve(
        Router::new()
            .route(
                "/estimate",
                post(|| async { Json(json!({"estimates": [{"course": "CSC225", "estimate": 97}]})) }),
            )
            .route(
                "/generate",
                post(move |Json(body): Json<Value>| async move {
                    *recorder.lock().unwrap() = body;
                    Json(json!({"schedule": [{"course": "CSC225", "sections": [section()]}]}))
                }),
            ),
    )
    .await;

    let store = catalog().await;
    let manager = manager(store, &base);

    let draft = manager.generate_schedule("2025", "Fall").await.unwrap();
    let expected = json!({
        "year": 2025,
        "terms": [{"term": "Fall", "courses": [{"course": "CSC225", "sections": [section()]}]}]
    });
    assert_eq!(serde_json::to_value(&draft).unwrap(), expected);

    // only the course offered in fall is sent, with its prerequisites
    let request = generated.lock().unwrap().clone();
    assert_eq!(request["courses"].as_array().unwrap().len(), 1);
    assert_eq!(request["courses"][0]["course"], "CSC225");
    assert_eq!(request["courses"][0]["prerequisites"], json!([["CSC115"]]));
    assert_eq!(request["courses"][0]["pre_enroll"], 97);
    assert_eq!(request["classrooms"][0]["room"], "104");

    manager.approve_schedule(2025, "Fall").await.unwrap();

    let err = manager
        .get_schedule(Lifecycle::Draft, "2025", "Fall")
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::NotFound(_)));

    let historical = manager
        .get_schedule(Lifecycle::Approved, "2025", "Fall")
        .await
        .unwrap();
    assert_eq!(historical, draft);
}

#[tokio::test]
async fn test_capacity_outage_still_generates() {
    let generated = Arc::new(Mutex::new(Value::Null));
    let recorder = generated.clone();
    let base = serve(
        Router::new()
            .route(
                "/estimate",
                post(|| async { (StatusCode::BAD_GATEWAY, "estimator offline") }),
            )
            .route(
                "/generate",
                post(move |Json(body): Json<Value>| async move {
                    *recorder.lock().unwrap() = body;
                    Json(json!({"schedule": [{"course": "CSC225", "sections": [section()]}]}))
                }),
            ),
    )
    .await;

    let manager = manager(catalog().await, &base);
    manager.generate_schedule("2025", "spring").await.unwrap();

    let request = generated.lock().unwrap().clone();
    let pre_enroll = request["courses"][0]["pre_enroll"].as_u64().unwrap() as u32;
    assert!(FALLBACK_ENROLLMENT_BAND.contains(&pre_enroll));
    assert_eq!(request["courses"][0]["min_enroll"], 5);
}

#[tokio::test]
async fn test_generator_outage_leaves_drafts_unchanged() {
    let base = serve(
        Router::new()
            .route(
                "/estimate",
                post(|| async { Json(json!({"estimates": []})) }),
            )
            .route(
                "/generate",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "no feasible timetable") }),
            ),
    )
    .await;

    let store = catalog().await;
    let manager = manager(store.clone(), &base);

    let before = manager.list_schedules(Lifecycle::Draft).await.unwrap();
    let writes = store.writes();

    let err = manager.generate_schedule("2025", "fall").await.unwrap_err();
    assert!(matches!(err, SchedulingError::GenerationService(_)));

    assert_eq!(manager.list_schedules(Lifecycle::Draft).await.unwrap(), before);
    assert_eq!(store.writes(), writes);
}
