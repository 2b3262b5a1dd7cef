use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, auth::CurrentUser, errors::AppError,
    models::dto::response::CompletionStatusResponse,
};

/// Idempotent: repeating the call returns the completion that already exists.
#[post("/api/lessons/{lesson_id}/complete")]
async fn complete_lesson(
    state: web::Data<AppState>,
    lesson_id: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let completion = state
        .lesson_service
        .mark_complete(&lesson_id, &user.id)
        .await?;

    Ok(HttpResponse::Ok().json(completion))
}

#[get("/api/lessons/{lesson_id}/completion-status")]
async fn get_completion_status(
    state: web::Data<AppState>,
    lesson_id: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let (is_completed, completed_at) = state
        .lesson_service
        .completion_status(&lesson_id, &user.id)
        .await?;

    Ok(HttpResponse::Ok().json(CompletionStatusResponse {
        is_completed,
        completed_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::assert_error_status;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn complete_endpoint_rejects_unidentified_caller() {
        let app = test::init_service(App::new().service(complete_lesson)).await;

        let req = test::TestRequest::post()
            .uri("/api/lessons/l-1/complete")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }
}
