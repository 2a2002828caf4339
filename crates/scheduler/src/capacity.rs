//! Client for the enrollment (capacity) estimation service.

use async_trait::async_trait;
use log::{info, warn};
use models::{
    course::{CapacityEstimate, Course},
    term::Term,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the estimation service produced for one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityOutcome {
    /// Predicted enrollment keyed by course shorthand
    Estimates(HashMap<String, u32>),
    /// The service was unavailable or answered with nothing usable
    Fallback,
}

impl CapacityOutcome {
    pub fn estimate_for(&self, shorthand: &str) -> Option<u32> {
        match self {
            Self::Estimates(estimates) => estimates.get(shorthand).copied(),
            Self::Fallback => None,
        }
    }
}

impl From<Vec<CapacityEstimate>> for CapacityOutcome {
    fn from(estimates: Vec<CapacityEstimate>) -> Self {
        if estimates.is_empty() {
            return Self::Fallback;
        }

        Self::Estimates(estimates.into_iter().map(|e| (e.course, e.estimate)).collect())
    }
}

/// Predicts per-course enrollment for a term. Never fails: problems degrade
/// to [`CapacityOutcome::Fallback`].
#[async_trait]
pub trait CapacityEstimator: Send + Sync {
    async fn estimate(&self, year: i32, term: Term, courses: &[Course]) -> CapacityOutcome;
}

#[derive(Debug, Serialize)]
struct EstimateRequest<'a> {
    year: String,
    term: &'a str,
    courses: Vec<CourseEntry<'a>>,
}

// the service identifies courses by a `course` field next to the catalog record
#[derive(Debug, Serialize)]
struct CourseEntry<'a> {
    course: &'a str,
    #[serde(flatten)]
    details: &'a Course,
}

#[derive(Debug, Deserialize)]
struct EstimateResponse {
    #[serde(default)]
    estimates: Vec<CapacityEstimate>,
}

/// Calls the estimation service over HTTP with a JSON body
#[derive(Debug, Clone)]
pub struct HttpCapacityClient {
    client: Client,
    url: String,
}

impl HttpCapacityClient {
    /// `client` carries the per-request timeout
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn fetch(&self, request: &EstimateRequest<'_>) -> Result<Vec<CapacityEstimate>, reqwest::Error> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let body: EstimateResponse = response.json().await?;
        Ok(body.estimates)
    }
}

#[async_trait]
impl CapacityEstimator for HttpCapacityClient {
    async fn estimate(&self, year: i32, term: Term, courses: &[Course]) -> CapacityOutcome {
        let request = EstimateRequest {
            year: year.to_string(),
            term: term.as_str(),
            courses: courses
                .iter()
                .map(|course| CourseEntry {
                    course: &course.shorthand,
                    details: course,
                })
                .collect(),
        };

        match self.fetch(&request).await {
            Ok(estimates) if estimates.is_empty() => {
                warn!("Capacity service returned no estimates for {year} {term}, using fallback");
                CapacityOutcome::Fallback
            }
            Ok(estimates) => {
                info!("Received {} capacity estimates for {year} {term}", estimates.len());
                estimates.into()
            }
            Err(e) => {
                warn!("Capacity service unavailable for {year} {term}, using fallback: {e}");
                CapacityOutcome::Fallback
            }
        }
    }
}
