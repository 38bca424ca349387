use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::{app_state::AppState, errors::AppError};

#[derive(Debug, Serialize)]
struct ScoreResponse {
    module_id: String,
    score: f64,
}

#[get("/api/learners/{learner_id}/scores/{module_id}")]
pub async fn get_score(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (learner_id, module_id) = path.into_inner();

    let score = state
        .score_repository
        .get_score(&learner_id, &module_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No score recorded for learner '{}' on module '{}'",
                learner_id, module_id
            ))
        })?;

    Ok(HttpResponse::Ok().json(ScoreResponse { module_id, score }))
}
