use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score breakdown attached to each suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMetrics {
    #[serde(rename = "finalScore")]
    pub final_score: f64,
    #[serde(rename = "skillOverlap")]
    pub skill_overlap: f64,
    #[serde(rename = "rateFit")]
    pub rate_fit: f64,
    #[serde(rename = "distanceScore")]
    pub distance_score: f64,
    #[serde(rename = "availabilityCoverage")]
    pub availability_coverage: f64,
    #[serde(rename = "overlapHours")]
    pub overlap_hours: f64,
}

/// Upcoming availability window surfaced alongside a suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityPreview {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "rolesOk")]
    pub roles_ok: Vec<String>,
    #[serde(rename = "minRate")]
    pub min_rate: f64,
}

/// One ranked candidate in a match response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSuggestion {
    #[serde(rename = "workerId")]
    pub worker_id: String,
    #[serde(rename = "workerName")]
    pub worker_name: String,
    #[serde(rename = "workerEmail")]
    pub worker_email: Option<String>,
    pub skills: Vec<String>,
    #[serde(rename = "minRate")]
    pub min_rate: f64,
    #[serde(rename = "maxRate")]
    pub max_rate: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
    pub metrics: ScoreMetrics,
    #[serde(rename = "availabilityPreview")]
    pub availability_preview: Vec<AvailabilityPreview>,
}

/// Outcome of an invitation side effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResult {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
    #[serde(rename = "emailStubPath")]
    pub email_stub_path: Option<String>,
}

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub suggestions: Vec<CandidateSuggestion>,
    pub invited: Option<InviteResult>,
}

/// Response for the read-only recommendation listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub suggestions: Vec<CandidateSuggestion>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
