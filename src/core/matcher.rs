use crate::core::scoring::{score_worker_for_job, ScoringWeights};
use crate::models::{JobForMatching, WorkerForMatching, WorkerMatchScore};

/// Result of the suggestion pipeline
#[derive(Debug)]
pub struct MatchResult {
    pub suggestions: Vec<WorkerMatchScore>,
    pub total_candidates: usize,
}

/// Ranking engine for worker-to-job matching
///
/// Pure and stateless: every call operates solely on its arguments, so
/// concurrent match requests need no coordination.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score every worker and sort descending by final score.
    ///
    /// No filtering happens here; callers apply their own thresholds and
    /// limits. The sort is stable, so equal scores keep their input order.
    pub fn rank_workers_for_job(
        &self,
        job: &JobForMatching,
        workers: &[WorkerForMatching],
    ) -> Vec<WorkerMatchScore> {
        let mut scores: Vec<WorkerMatchScore> = workers
            .iter()
            .map(|worker| score_worker_for_job(job, worker, &self.weights))
            .collect();

        scores.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scores
    }

    /// The shared consumer pipeline: rank, drop candidates with no skill
    /// overlap or no availability coverage, truncate to `limit`.
    pub fn suggest_candidates(
        &self,
        job: &JobForMatching,
        workers: &[WorkerForMatching],
        limit: usize,
    ) -> MatchResult {
        let total_candidates = workers.len();

        let mut suggestions: Vec<WorkerMatchScore> = self
            .rank_workers_for_job(job, workers)
            .into_iter()
            .filter(|score| score.skill_overlap > 0.0 && score.availability_coverage > 0.0)
            .collect();

        suggestions.truncate(limit);

        MatchResult {
            suggestions,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
