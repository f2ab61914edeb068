// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BookingStatus, Coordinates, JobForMatching, JobStatus, TimeRange, WorkerForMatching,
    WorkerMatchScore,
};
pub use requests::MatchRequest;
pub use responses::{
    AvailabilityPreview, CandidateSuggestion, ErrorResponse, HealthResponse, InviteResult,
    MatchResponse, RecommendationsResponse, ScoreMetrics,
};
