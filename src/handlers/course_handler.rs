use actix_web::{get, patch, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    app_state::AppState, auth::CurrentUser, errors::AppError,
    models::dto::request::ReorderContentRequest,
};

#[get("/api/courses/{course_id}/sequence")]
async fn get_sequence(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let sequence = state
        .sequence_service
        .sequence_state(&course_id, &user.id)
        .await?;

    Ok(HttpResponse::Ok().json(sequence))
}

#[patch("/api/courses/{course_id}/content-order")]
async fn reorder_content(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    request: web::Json<ReorderContentRequest>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    state
        .sequence_service
        .reorder(&course_id, request.updates)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Content order updated" })))
}
