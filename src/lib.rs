//! GIGS Match - worker-to-job matching service for the GIGS staffing
//! marketplace
//!
//! This library provides the candidate ranking engine used to suggest workers
//! for event staffing jobs. The core is a pure, deterministic scoring function
//! over in-memory inputs; the surrounding service fetches jobs and workers
//! from storage, ranks candidates, and optionally records a booking offer.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    calculate_availability_coverage, has_any_overlap, haversine_distance, is_within_radius,
    overlap_hours, score_worker_for_job, Matcher, ScoringWeights,
};
pub use crate::models::{
    Coordinates, JobForMatching, MatchRequest, MatchResponse, TimeRange, WorkerForMatching,
    WorkerMatchScore,
};
