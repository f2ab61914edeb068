use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank candidates for a job and optionally invite one
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "job_id", rename = "jobId")]
    pub job_id: String,
    #[serde(default)]
    #[serde(alias = "invite_worker_id", rename = "inviteWorkerId")]
    pub invite_worker_id: Option<String>,
}
