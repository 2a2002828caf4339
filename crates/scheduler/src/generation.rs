//! Client for the timetable generation service.

use crate::error::{SchedulingError, SchedulingResult};
use async_trait::async_trait;
use log::{error, info};
use models::{
    classroom::Classroom, course::CourseWithCapacity, schedule::CourseOffering, user::Instructor,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Everything the generator needs to place sections for one term
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    pub year: i32,
    /// The term as the caller spelled it
    pub term_label: &'a str,
    pub instructors: &'a [Instructor],
    pub courses: &'a [CourseWithCapacity],
    pub classrooms: &'a [Classroom],
}

/// Assigns sections, rooms and instructors. Any failure is fatal for the request.
#[async_trait]
pub trait TimetableGenerator: Send + Sync {
    async fn generate(&self, input: GenerationInput<'_>) -> SchedulingResult<Vec<CourseOffering>>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    year: String,
    term: &'a str,
    professors: &'a [Instructor],
    courses: &'a [CourseWithCapacity],
    classrooms: &'a [Classroom],
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    schedule: Vec<CourseOffering>,
}

#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    client: Client,
    url: String,
}

impl HttpGenerationClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TimetableGenerator for HttpGenerationClient {
    async fn generate(&self, input: GenerationInput<'_>) -> SchedulingResult<Vec<CourseOffering>> {
        let request = GenerateRequest {
            year: input.year.to_string(),
            term: input.term_label,
            professors: input.instructors,
            courses: input.courses,
            classrooms: input.classrooms,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach timetable generator: {e}");
                SchedulingError::GenerationService("service unreachable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Timetable generator responded with {status}");
            return Err(SchedulingError::GenerationService(format!(
                "service responded with {status}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            error!("Failed to decode generated timetable: {e}");
            SchedulingError::GenerationService("malformed response".to_string())
        })?;

        info!(
            "Generated {} course offerings for {} {}",
            body.schedule.len(),
            input.year,
            input.term_label
        );
        Ok(body.schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/generate")
    }

    fn input<'a>(courses: &'a [CourseWithCapacity]) -> GenerationInput<'a> {
        GenerationInput {
            year: 2025,
            term_label: "Fall",
            instructors: &[],
            courses,
            classrooms: &[],
        }
    }

    #[tokio::test]
    async fn test_generated_offerings_are_returned() {
        let seen = Arc::new(Mutex::new(Value::Null));
        let recorder = seen.clone();
        let url = serve(Router::new().route(
            "/generate",
            post(move |Json(body): Json<Value>| async move {
                *recorder.lock().unwrap() = body;
                Json(json!({"schedule": [{
                    "course": "CSC225",
                    "sections": [{
                        "num": "A01",
                        "building": "ECS",
                        "room": "104",
                        "professor": "rich",
                        "days": ["Monday", "Thursday"],
                        "num_seats": 120,
                        "num_enroll": 0,
                        "start_time": "10:00",
                        "end_time": "11:20"
                    }]
                }]}))
            }),
        ))
        .await;

        let courses = vec![CourseWithCapacity {
            course: "CSC225".to_string(),
            peng: false,
            prerequisites: vec![vec!["CSC115"]].into(),
            corequisites: Default::default(),
            pre_enroll: 97,
            min_enroll: 5,
            hours: [3, 0, 0],
        }];

        let client = HttpGenerationClient::new(Client::new(), url);
        let offerings = client.generate(input(&courses)).await.unwrap();

        assert_eq!(offerings.len(), 1);
        assert_eq!(offerings[0].sections[0].room, "104");

        let body = seen.lock().unwrap().clone();
        assert_eq!(body["year"], "2025");
        assert_eq!(body["term"], "Fall");
        assert_eq!(body["professors"], json!([]));
        assert_eq!(body["courses"][0]["pre_enroll"], 97);
        assert_eq!(body["courses"][0]["hours"], json!([3, 0, 0]));
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_hard_failure() {
        let url = serve(Router::new().route(
            "/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "solver crashed") }),
        ))
        .await;

        let client = HttpGenerationClient::new(Client::new(), url);
        let err = client.generate(input(&[])).await.unwrap_err();
        assert!(matches!(err, SchedulingError::GenerationService(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_hard_failure() {
        let url = serve(Router::new().route(
            "/generate",
            post(|| async { Json(json!({"unexpected": true})) }),
        ))
        .await;

        let client = HttpGenerationClient::new(Client::new(), url);
        let err = client.generate(input(&[])).await.unwrap_err();
        assert!(matches!(err, SchedulingError::GenerationService(_)));
    }
}
