use std::collections::HashSet;

use crate::core::distance::haversine_distance;
use crate::core::overlap::calculate_availability_coverage;
use crate::models::{JobForMatching, WorkerForMatching, WorkerMatchScore};

/// Distance score assigned when the job carries no location: neutral, neither
/// rewarded nor penalized.
const UNLOCATED_JOB_DISTANCE_SCORE: f64 = 0.5;

/// Scoring weights for the composite score
///
/// The defaults sum to 1.0, which keeps the final score in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skill: f64,
    pub availability: f64,
    pub rate: f64,
    pub distance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.40,
            availability: 0.30,
            rate: 0.20,
            distance: 0.10,
        }
    }
}

/// Score a single worker against a job.
///
/// Composite formula:
/// ```text
/// final = skill_overlap * 0.40
///       + availability_coverage * 0.30
///       + rate_fit * 0.20
///       + distance_score * 0.10
/// ```
/// rounded to 4 decimal places. Every component lies in [0, 1]; the function
/// is total over well-typed input and never errors.
pub fn score_worker_for_job(
    job: &JobForMatching,
    worker: &WorkerForMatching,
    weights: &ScoringWeights,
) -> WorkerMatchScore {
    let skill_overlap = calculate_skill_overlap(job, worker);

    let availability = calculate_availability_coverage(&job.time_range(), &worker.availability);

    let rate_fit = calculate_rate_fit(job.rate, worker.min_rate, worker.max_rate);

    let (distance_km, distance_score) = calculate_distance_score(job, worker);

    let final_score = skill_overlap * weights.skill
        + availability.coverage_ratio * weights.availability
        + rate_fit * weights.rate
        + distance_score * weights.distance;

    WorkerMatchScore {
        worker_id: worker.id.clone(),
        worker_name: worker.name.clone(),
        skill_overlap,
        rate_fit,
        distance_score,
        availability_coverage: availability.coverage_ratio,
        overlap_hours: availability.overlap_hours,
        distance_km,
        final_score: round_score(final_score.clamp(0.0, 1.0)),
    }
}

/// Fraction of the job's needed roles the worker covers.
///
/// Set semantics: extra unrelated skills are not penalized, partial coverage
/// gets partial credit. A job declaring no roles matches nothing.
fn calculate_skill_overlap(job: &JobForMatching, worker: &WorkerForMatching) -> f64 {
    let needed: HashSet<&str> = job.needed_roles.iter().map(String::as_str).collect();
    if needed.is_empty() {
        return 0.0;
    }

    let skills: HashSet<&str> = worker.skills.iter().map(String::as_str).collect();
    let covered = skills.intersection(&needed).count();

    covered as f64 / needed.len() as f64
}

/// Normalized closeness of the job rate to the worker's pay band (0-1)
///
/// Inside the band scores 1; outside, the score falls off smoothly with the
/// gap to the nearest bound rather than cutting to zero.
#[inline]
fn calculate_rate_fit(job_rate: f64, worker_min: f64, worker_max: f64) -> f64 {
    // Normalize a reversed band rather than rejecting it
    let (min_rate, max_rate) = if worker_max < worker_min {
        (worker_max, worker_min)
    } else {
        (worker_min, worker_max)
    };

    if job_rate >= min_rate && job_rate <= max_rate {
        return 1.0;
    }

    let diff = if job_rate < min_rate {
        min_rate - job_rate
    } else {
        job_rate - max_rate
    };

    let normaliser = max_rate.max(min_rate).max(job_rate).max(1.0);
    (1.0 - diff / normaliser).max(0.0)
}

/// Distance in kilometres and the distance score (0-1)
///
/// No job location scores a neutral 0.5 with no distance. An invalid travel
/// radius or a worker outside their stated radius scores 0: the radius is a
/// hard worker-stated constraint, unlike the soft rate falloff. Inside the
/// radius the score falls linearly from 1 at the origin to 0 at the boundary.
#[inline]
fn calculate_distance_score(
    job: &JobForMatching,
    worker: &WorkerForMatching,
) -> (Option<f64>, f64) {
    let Some(location) = job.location else {
        return (None, UNLOCATED_JOB_DISTANCE_SCORE);
    };

    let distance = haversine_distance(location, worker.home);

    if !worker.radius_km.is_finite() || worker.radius_km <= 0.0 {
        return (Some(distance), 0.0);
    }

    if distance > worker.radius_km {
        return (Some(distance), 0.0);
    }

    (Some(distance), (1.0 - distance / worker.radius_km).max(0.0))
}

/// Round to 4 decimal places for stable sorting and display.
#[inline]
fn round_score(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
