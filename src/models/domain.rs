use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinate pair in degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]; rows with
/// out-of-domain or non-finite values are rejected where they are loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Time window with UTC bounds. An inverted window (`end <= start`) is
/// tolerated everywhere and treated as empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Job descriptor the engine scores candidates against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobForMatching {
    pub id: String,
    #[serde(rename = "neededRoles")]
    pub needed_roles: Vec<String>,
    pub rate: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `None` means the job has no geocoded venue and cannot be geofenced.
    #[serde(default)]
    pub location: Option<Coordinates>,
}

impl JobForMatching {
    /// The job window as a time range for overlap arithmetic.
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// Worker descriptor the engine scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerForMatching {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub skills: Vec<String>,
    #[serde(rename = "minRate")]
    pub min_rate: f64,
    #[serde(rename = "maxRate")]
    pub max_rate: f64,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    #[serde(rename = "homeLocation")]
    pub home: Coordinates,
    #[serde(default)]
    pub availability: Vec<TimeRange>,
}

/// Scored candidate produced by the engine. Derived per request, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerMatchScore {
    #[serde(rename = "workerId")]
    pub worker_id: String,
    #[serde(rename = "workerName")]
    pub worker_name: Option<String>,
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
    /// `None` iff the job carried no location.
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
    #[serde(rename = "finalScore")]
    pub final_score: f64,
}

/// Job posting lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    PartiallyFilled,
    Filled,
    Cancelled,
}

/// Booking lifecycle states for worker-job assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Offered,
    Accepted,
    Declined,
    Cancelled,
    Completed,
}
