use std::collections::HashSet;

use crate::core::distance::is_within_radius;
use crate::core::overlap::has_any_overlap;
use crate::models::{JobForMatching, WorkerForMatching};

/// Whether the worker has at least one of the job's needed roles.
#[inline]
pub fn has_needed_skill(job: &JobForMatching, worker: &WorkerForMatching) -> bool {
    worker
        .skills
        .iter()
        .any(|skill| job.needed_roles.contains(skill))
}

/// Whether the job's offered rate falls inside the worker's pay band.
#[inline]
pub fn rate_in_band(job: &JobForMatching, worker: &WorkerForMatching) -> bool {
    job.rate >= worker.min_rate && job.rate <= worker.max_rate
}

/// Whether the worker can travel to the job. An unlocated job passes every
/// worker.
#[inline]
pub fn within_travel_radius(job: &JobForMatching, worker: &WorkerForMatching) -> bool {
    match job.location {
        Some(location) => is_within_radius(worker.home, location, worker.radius_km),
        None => true,
    }
}

/// Eligibility pre-filter applied by the match endpoint before ranking.
///
/// A worker already booked on the job is excluded unless they are the one
/// being invited (re-inviting refreshes the existing booking instead).
pub fn is_eligible(
    job: &JobForMatching,
    worker: &WorkerForMatching,
    booked_worker_ids: &HashSet<String>,
    invite_worker_id: Option<&str>,
) -> bool {
    if !has_needed_skill(job, worker) {
        return false;
    }

    if !rate_in_band(job, worker) {
        return false;
    }

    if !within_travel_radius(job, worker) {
        return false;
    }

    if booked_worker_ids.contains(&worker.id) && invite_worker_id != Some(worker.id.as_str()) {
        return false;
    }

    has_any_overlap(&job.time_range(), &worker.availability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, TimeRange};
    use chrono::{DateTime, Utc};

    fn ts(value: &str) -> DateTime<Utc> {
        value.parse().expect("valid RFC 3339 timestamp")
    }

    fn create_test_job() -> JobForMatching {
        JobForMatching {
            id: "job_1".to_string(),
            needed_roles: vec!["Usher".to_string(), "FOH".to_string()],
            rate: 25.0,
            start: ts("2024-02-01T12:00:00Z"),
            end: ts("2024-02-01T20:00:00Z"),
            location: Some(Coordinates {
                lat: 40.7128,
                lng: -74.006,
            }),
        }
    }

    fn create_test_worker(id: &str) -> WorkerForMatching {
        WorkerForMatching {
            id: id.to_string(),
            name: None,
            skills: vec!["Usher".to_string()],
            min_rate: 20.0,
            max_rate: 30.0,
            radius_km: 50.0,
            home: Coordinates {
                lat: 40.7306,
                lng: -73.9352,
            },
            availability: vec![TimeRange::new(
                ts("2024-02-01T10:00:00Z"),
                ts("2024-02-01T22:00:00Z"),
            )],
        }
    }

    #[test]
    fn test_eligible_worker_passes() {
        let job = create_test_job();
        let worker = create_test_worker("w1");

        assert!(is_eligible(&job, &worker, &HashSet::new(), None));
    }

    #[test]
    fn test_missing_skill_fails() {
        let job = create_test_job();
        let mut worker = create_test_worker("w1");
        worker.skills = vec!["Security".to_string()];

        assert!(!is_eligible(&job, &worker, &HashSet::new(), None));
    }

    #[test]
    fn test_rate_outside_band_fails() {
        let job = create_test_job();
        let mut worker = create_test_worker("w1");
        worker.min_rate = 40.0;
        worker.max_rate = 60.0;

        assert!(!is_eligible(&job, &worker, &HashSet::new(), None));
    }

    #[test]
    fn test_outside_radius_fails() {
        let job = create_test_job();
        let mut worker = create_test_worker("w1");
        worker.home = Coordinates {
            lat: 41.0,
            lng: -75.0,
        };
        worker.radius_km = 10.0;

        assert!(!is_eligible(&job, &worker, &HashSet::new(), None));
    }

    #[test]
    fn test_unlocated_job_skips_radius_check() {
        let mut job = create_test_job();
        job.location = None;
        let mut worker = create_test_worker("w1");
        worker.radius_km = 0.0;

        assert!(is_eligible(&job, &worker, &HashSet::new(), None));
    }

    #[test]
    fn test_booked_worker_excluded_unless_invited() {
        let job = create_test_job();
        let worker = create_test_worker("w1");
        let booked: HashSet<String> = ["w1".to_string()].into_iter().collect();

        assert!(!is_eligible(&job, &worker, &booked, None));
        assert!(!is_eligible(&job, &worker, &booked, Some("w2")));
        assert!(is_eligible(&job, &worker, &booked, Some("w1")));
    }

    #[test]
    fn test_no_availability_overlap_fails() {
        let job = create_test_job();
        let mut worker = create_test_worker("w1");
        worker.availability = vec![TimeRange::new(
            ts("2024-02-02T10:00:00Z"),
            ts("2024-02-02T22:00:00Z"),
        )];

        assert!(!is_eligible(&job, &worker, &HashSet::new(), None));
    }
}
