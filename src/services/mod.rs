// Service exports
pub mod email;
pub mod postgres;
pub mod rate_limit;

pub use email::{EmailError, EmailOutbox, EmailStub};
pub use postgres::{AvailabilitySlot, JobRecord, PostgresClient, PostgresError, WorkerRecord};
pub use rate_limit::{identify_request, RateLimitDecision, RateLimiter};
