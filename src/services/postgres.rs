use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{BookingStatus, Coordinates, JobForMatching, JobStatus, TimeRange, WorkerForMatching};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Job posting row with the booking state the matcher needs
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub needed_roles: Vec<String>,
    pub rate: f64,
    pub status: JobStatus,
    pub booked_worker_ids: Vec<Uuid>,
}

impl JobRecord {
    /// Engine input for this job. A job with missing or non-finite
    /// coordinates is treated as unlocated rather than fed NaN.
    pub fn to_matching(&self) -> JobForMatching {
        let location = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coordinates { lat, lng })
            }
            _ => None,
        };

        JobForMatching {
            id: self.id.to_string(),
            needed_roles: self.needed_roles.clone(),
            rate: self.rate,
            start: self.start_at,
            end: self.end_at,
            location,
        }
    }
}

/// Availability window attached to a worker profile
#[derive(Debug, Clone)]
pub struct AvailabilitySlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub roles_ok: Vec<String>,
    pub min_rate: f64,
}

/// Worker profile row joined with user identity and availability
#[derive(Debug, Clone)]
pub struct WorkerRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub skills: Vec<String>,
    pub min_rate: f64,
    pub max_rate: f64,
    pub radius_km: f64,
    pub home_lat: f64,
    pub home_lng: f64,
    pub availability: Vec<AvailabilitySlot>,
}

impl WorkerRecord {
    /// Display name falling back to the account email.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.email.clone())
    }

    /// Engine input for this worker, or `None` when the stored home location
    /// is not finite. NaN coordinates must never reach the ranking sort.
    pub fn to_matching(&self) -> Option<WorkerForMatching> {
        if !self.home_lat.is_finite() || !self.home_lng.is_finite() {
            return None;
        }

        Some(WorkerForMatching {
            id: self.id.to_string(),
            name: Some(self.display_name()),
            skills: self.skills.clone(),
            min_rate: self.min_rate,
            max_rate: self.max_rate,
            radius_km: self.radius_km,
            home: Coordinates {
                lat: self.home_lat,
                lng: self.home_lng,
            },
            availability: self
                .availability
                .iter()
                .map(|slot| TimeRange::new(slot.start, slot.end))
                .collect(),
        })
    }
}

/// PostgreSQL client for the marketplace store
///
/// The matcher itself never touches storage; this client performs the
/// upstream reads (job, candidate workers) and the booking side effect on
/// behalf of the request handlers.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch a job posting with the worker ids already booked on it.
    ///
    /// Returns `None` when the job does not exist.
    pub async fn get_job(&self, job_id: Uuid) -> Result<Option<JobRecord>, PostgresError> {
        let query = r#"
            SELECT id, title, description, location, lat, lng, start_at, end_at,
                   needed_roles, rate, status
            FROM job_postings
            WHERE id = $1
        "#;

        let row = match sqlx::query(query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?
        {
            Some(row) => row,
            None => return Ok(None),
        };

        let booked_rows = sqlx::query("SELECT worker_id FROM bookings WHERE job_id = $1")
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;

        let booked_worker_ids = booked_rows
            .iter()
            .map(|booking| booking.get("worker_id"))
            .collect();

        Ok(Some(JobRecord {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            location: row.get("location"),
            lat: row.get("lat"),
            lng: row.get("lng"),
            start_at: row.get("start_at"),
            end_at: row.get("end_at"),
            needed_roles: row.get("needed_roles"),
            rate: row.get("rate"),
            status: row.get("status"),
            booked_worker_ids,
        }))
    }

    /// Fetch every worker profile with identity and availability windows.
    ///
    /// Candidate bounding is the caller's concern; this mirrors the unfiltered
    /// fetch the matching endpoint performs today.
    pub async fn list_workers(&self) -> Result<Vec<WorkerRecord>, PostgresError> {
        let worker_query = r#"
            SELECT wp.id, wp.skills, wp.min_rate, wp.max_rate, wp.radius_km,
                   wp.home_lat, wp.home_lng, u.name, u.email
            FROM worker_profiles wp
            JOIN users u ON u.id = wp.user_id
            ORDER BY wp.created_at
        "#;

        let rows = sqlx::query(worker_query).fetch_all(&self.pool).await?;

        let slot_query = r#"
            SELECT worker_id, start_at, end_at, roles_ok, min_rate
            FROM availability_slots
            ORDER BY start_at
        "#;

        let slot_rows = sqlx::query(slot_query).fetch_all(&self.pool).await?;

        let mut slots_by_worker: HashMap<Uuid, Vec<AvailabilitySlot>> = HashMap::new();
        for slot in &slot_rows {
            slots_by_worker
                .entry(slot.get("worker_id"))
                .or_default()
                .push(AvailabilitySlot {
                    start: slot.get("start_at"),
                    end: slot.get("end_at"),
                    roles_ok: slot.get("roles_ok"),
                    min_rate: slot.get("min_rate"),
                });
        }

        let workers = rows
            .iter()
            .map(|row| {
                let id: Uuid = row.get("id");
                WorkerRecord {
                    id,
                    name: row.get("name"),
                    email: row.get("email"),
                    skills: row.get("skills"),
                    min_rate: row.get("min_rate"),
                    max_rate: row.get("max_rate"),
                    radius_km: row.get("radius_km"),
                    home_lat: row.get("home_lat"),
                    home_lng: row.get("home_lng"),
                    availability: slots_by_worker.remove(&id).unwrap_or_default(),
                }
            })
            .collect();

        tracing::debug!("Loaded {} worker profiles", rows.len());

        Ok(workers)
    }

    /// Create or refresh an OFFERED booking for a worker on a job.
    ///
    /// Uses INSERT ... ON CONFLICT so that re-inviting a worker refreshes the
    /// existing booking instead of failing on the uniqueness constraint.
    pub async fn upsert_offer(
        &self,
        job_id: Uuid,
        worker_id: Uuid,
    ) -> Result<Uuid, PostgresError> {
        let query = r#"
            INSERT INTO bookings (id, job_id, worker_id, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (job_id, worker_id)
            DO UPDATE SET
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING id
        "#;

        let row = sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(job_id)
            .bind(worker_id)
            .bind(BookingStatus::Offered)
            .fetch_one(&self.pool)
            .await?;

        let booking_id: Uuid = row.get("id");

        tracing::debug!(
            "Upserted booking offer: job {} -> worker {} (booking {})",
            job_id,
            worker_id,
            booking_id
        );

        Ok(booking_id)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
