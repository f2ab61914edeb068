use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, HttpResponseBuilder, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::core::{filters, Matcher};
use crate::models::{
    AvailabilityPreview, CandidateSuggestion, ErrorResponse, HealthResponse, InviteResult,
    MatchRequest, MatchResponse, RecommendationsResponse, ScoreMetrics, WorkerForMatching,
    WorkerMatchScore,
};
use crate::services::{
    identify_request, EmailOutbox, EmailStub, PostgresClient, RateLimitDecision, RateLimiter,
    WorkerRecord,
};

/// Availability windows shown per suggestion
const AVAILABILITY_PREVIEW_SLOTS: usize = 3;

/// Per-endpoint truncation limits
#[derive(Debug, Clone, Copy)]
pub struct MatchLimits {
    pub suggestions: usize,
    pub recommendations: usize,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub rate_limiter: Arc<RateLimiter>,
    pub outbox: Arc<EmailOutbox>,
    pub matcher: Matcher,
    pub limits: MatchLimits,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/match", web::post().to(find_candidates))
        .route(
            "/match/{job_id}/recommendations",
            web::get().to(job_recommendations),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Response builder carrying the rate-limit headers every match response
/// includes, allowed or not.
fn respond(status: StatusCode, decision: &RateLimitDecision) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder
        .insert_header(("X-RateLimit-Limit", decision.limit.to_string()))
        .insert_header(("X-RateLimit-Remaining", decision.remaining.to_string()))
        .insert_header(("X-RateLimit-Reset", decision.reset_ms.to_string()));
    builder
}

/// Assemble response suggestions from engine scores and the worker records
/// they were computed from.
fn build_suggestions(
    scores: &[WorkerMatchScore],
    records: &HashMap<String, &WorkerRecord>,
) -> Vec<CandidateSuggestion> {
    scores
        .iter()
        .filter_map(|score| {
            let record = records.get(&score.worker_id)?;

            let mut slots = record.availability.clone();
            slots.sort_by_key(|slot| slot.start);

            Some(CandidateSuggestion {
                worker_id: score.worker_id.clone(),
                worker_name: record.display_name(),
                worker_email: Some(record.email.clone()),
                skills: record.skills.clone(),
                min_rate: record.min_rate,
                max_rate: record.max_rate,
                distance_km: score.distance_km,
                metrics: ScoreMetrics {
                    final_score: score.final_score,
                    skill_overlap: score.skill_overlap,
                    rate_fit: score.rate_fit,
                    distance_score: score.distance_score,
                    availability_coverage: score.availability_coverage,
                    overlap_hours: score.overlap_hours,
                },
                availability_preview: slots
                    .into_iter()
                    .take(AVAILABILITY_PREVIEW_SLOTS)
                    .map(|slot| AvailabilityPreview {
                        start: slot.start,
                        end: slot.end,
                        roles_ok: slot.roles_ok,
                        min_rate: slot.min_rate,
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Find candidates endpoint
///
/// POST /api/v1/match
///
/// Request body:
/// ```json
/// {
///   "jobId": "uuid",
///   "inviteWorkerId": "uuid"
/// }
/// ```
///
/// Ranks eligible workers for the job; when `inviteWorkerId` is present, also
/// records a booking offer and writes an offer email stub.
async fn find_candidates(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let identifier = identify_request(&http_req);
    let decision = state.rate_limiter.check(&format!("match:{}", identifier));

    if !decision.allowed {
        return respond(StatusCode::TOO_MANY_REQUESTS, &decision).json(ErrorResponse {
            error: "rate_limited".to_string(),
            message: "Too many matching requests.".to_string(),
            status_code: 429,
        });
    }

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return respond(StatusCode::BAD_REQUEST, &decision).json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let job_id = match Uuid::parse_str(&req.job_id) {
        Ok(id) => id,
        Err(_) => {
            return respond(StatusCode::BAD_REQUEST, &decision).json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: "jobId is not a valid identifier.".to_string(),
                status_code: 400,
            });
        }
    };

    let invite_worker_uuid = match req.invite_worker_id.as_deref().map(Uuid::parse_str) {
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => {
            return respond(StatusCode::BAD_REQUEST, &decision).json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: "inviteWorkerId is not a valid identifier.".to_string(),
                status_code: 400,
            });
        }
        None => None,
    };

    tracing::info!("Finding candidates for job: {}", job_id);

    let job = match state.postgres.get_job(job_id).await {
        Ok(Some(job)) => job,
        Ok(None) => {
            return respond(StatusCode::NOT_FOUND, &decision).json(ErrorResponse {
                error: "Job not found".to_string(),
                message: "Job not found.".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch job {}: {}", job_id, e);
            return respond(StatusCode::INTERNAL_SERVER_ERROR, &decision).json(ErrorResponse {
                error: "Failed to fetch job".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let workers = match state.postgres.list_workers().await {
        Ok(workers) => workers,
        Err(e) => {
            tracing::error!("Failed to fetch workers for job {}: {}", job_id, e);
            return respond(StatusCode::INTERNAL_SERVER_ERROR, &decision).json(ErrorResponse {
                error: "Failed to fetch workers".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let job_for_matching = job.to_matching();
    let booked: HashSet<String> = job
        .booked_worker_ids
        .iter()
        .map(|id| id.to_string())
        .collect();
    let invite_worker_id = req.invite_worker_id.as_deref();

    // Eligibility pre-filter before ranking
    let mut records_by_id: HashMap<String, &WorkerRecord> = HashMap::new();
    let mut eligible: Vec<WorkerForMatching> = Vec::new();
    for record in &workers {
        let Some(candidate) = record.to_matching() else {
            tracing::warn!("Skipping worker {} with non-finite home location", record.id);
            continue;
        };

        if filters::is_eligible(&job_for_matching, &candidate, &booked, invite_worker_id) {
            records_by_id.insert(candidate.id.clone(), record);
            eligible.push(candidate);
        }
    }

    tracing::debug!(
        "{} of {} workers eligible for job {}",
        eligible.len(),
        workers.len(),
        job_id
    );

    let result = state
        .matcher
        .suggest_candidates(&job_for_matching, &eligible, state.limits.suggestions);

    let suggestions = build_suggestions(&result.suggestions, &records_by_id);

    let mut invited: Option<InviteResult> = None;

    if let (Some(invite_id), Some(invite_uuid)) = (invite_worker_id, invite_worker_uuid) {
        let Some(record) = records_by_id.get(invite_id) else {
            return respond(StatusCode::NOT_FOUND, &decision).json(ErrorResponse {
                error: "Worker not found".to_string(),
                message: "Worker not found for invitation.".to_string(),
                status_code: 404,
            });
        };

        let booking_id = match state.postgres.upsert_offer(job.id, invite_uuid).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    "Failed to record booking offer for worker {} on job {}: {}",
                    invite_uuid,
                    job_id,
                    e
                );
                return respond(StatusCode::INTERNAL_SERVER_ERROR, &decision).json(
                    ErrorResponse {
                        error: "Failed to record booking offer".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    },
                );
            }
        };

        tracing::info!(
            "Booking offer created: job {} -> worker {} (booking {})",
            job_id,
            invite_uuid,
            booking_id
        );

        let greeting = record.name.clone().unwrap_or_else(|| "there".to_string());
        let stub = EmailStub {
            to: record.email.clone(),
            subject: format!("Offer: {}", job.title),
            body: format!(
                "Hi {},\n\nYou're invited to work {} on {}.\nRate: ${}/hr. Log in to your dashboard to accept or decline.",
                greeting,
                job.title,
                job.start_at.to_rfc2822(),
                job.rate
            ),
        };

        // Best-effort: a failed stub never fails the invitation
        let email_stub_path = match state.outbox.write_stub(&stub).await {
            Ok(path) => {
                tracing::info!("Offer email stub recorded at {}", path.display());
                Some(path.display().to_string())
            }
            Err(e) => {
                tracing::error!("Failed to write offer email stub: {}", e);
                None
            }
        };

        invited = Some(InviteResult {
            booking_id: booking_id.to_string(),
            email_stub_path,
        });
    }

    tracing::info!(
        "Returning {} suggestions for job {} (from {} eligible of {} workers)",
        suggestions.len(),
        job_id,
        result.total_candidates,
        workers.len()
    );

    respond(StatusCode::OK, &decision).json(MatchResponse {
        job_id: job.id.to_string(),
        suggestions,
        invited,
    })
}

/// Read-only candidate recommendations for a job
///
/// GET /api/v1/match/{job_id}/recommendations
///
/// Ranks every worker with no eligibility pre-filter and no side effects,
/// truncated to the smaller recommendation limit.
async fn job_recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let job_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: "jobId is not a valid identifier.".to_string(),
                status_code: 400,
            });
        }
    };

    let job = match state.postgres.get_job(job_id).await {
        Ok(Some(job)) => job,
        Ok(None) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Job not found".to_string(),
                message: "Job not found.".to_string(),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch job {}: {}", job_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch job".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let workers = match state.postgres.list_workers().await {
        Ok(workers) => workers,
        Err(e) => {
            tracing::error!("Failed to fetch workers for job {}: {}", job_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch workers".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let job_for_matching = job.to_matching();

    let mut records_by_id: HashMap<String, &WorkerRecord> = HashMap::new();
    let mut candidates: Vec<WorkerForMatching> = Vec::new();
    for record in &workers {
        let Some(candidate) = record.to_matching() else {
            tracing::warn!("Skipping worker {} with non-finite home location", record.id);
            continue;
        };
        records_by_id.insert(candidate.id.clone(), record);
        candidates.push(candidate);
    }

    let result = state.matcher.suggest_candidates(
        &job_for_matching,
        &candidates,
        state.limits.recommendations,
    );

    let suggestions = build_suggestions(&result.suggestions, &records_by_id);

    tracing::debug!(
        "Returning {} recommendations for job {} (from {} workers)",
        suggestions.len(),
        job_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        job_id: job.id.to_string(),
        suggestions,
        total_candidates: result.total_candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_default_limits() {
        let limits = MatchLimits {
            suggestions: 20,
            recommendations: 12,
        };

        assert!(limits.recommendations < limits.suggestions);
    }
}
