use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::domain::QuestionDraft,
    models::dto::CreateQuestionRequest,
};

#[get("/api/modules/{module_id}/questions")]
pub async fn list_questions(
    state: web::Data<AppState>,
    module_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let questions = state
        .authoring_service
        .list_questions(&module_id)
        .await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[post("/api/modules/{module_id}/questions")]
pub async fn create_question(
    state: web::Data<AppState>,
    module_id: web::Path<String>,
    request: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let draft = QuestionDraft::from(request.into_inner());
    let question = state
        .authoring_service
        .save_question(&module_id, &draft)
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[delete("/api/modules/{module_id}/questions/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (module_id, id) = path.into_inner();
    state
        .authoring_service
        .delete_question(&module_id, &id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
