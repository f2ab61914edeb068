// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod overlap;
pub mod scoring;

pub use distance::{haversine_distance, is_within_radius, EARTH_RADIUS_KM};
pub use filters::{has_needed_skill, is_eligible, rate_in_band, within_travel_radius};
pub use matcher::{MatchResult, Matcher};
pub use overlap::{
    calculate_availability_coverage, has_any_overlap, overlap_hours, AvailabilityCoverage,
};
pub use scoring::{score_worker_for_job, ScoringWeights};
