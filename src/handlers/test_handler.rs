use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::CurrentUser,
    errors::AppError,
    models::dto::request::{AttemptHistoryParams, SubmitTestAttemptRequest},
    models::dto::response::{AttemptHistoryResponse, HasPassedResponse, TestView},
};

/// Learner view of a test; answer keys are stripped before serialization.
#[get("/api/tests/{test_id}")]
async fn get_test(
    state: web::Data<AppState>,
    test_id: web::Path<String>,
    _user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let test = state.attempt_service.get_test(&test_id).await?;
    Ok(HttpResponse::Ok().json(TestView::from(test)))
}

#[post("/api/tests/{test_id}/submit")]
async fn submit_attempt(
    state: web::Data<AppState>,
    test_id: web::Path<String>,
    request: web::Json<SubmitTestAttemptRequest>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let attempt = state
        .attempt_service
        .submit_attempt(&test_id, &user.id, request.answers)
        .await?;

    Ok(HttpResponse::Created().json(attempt))
}

#[get("/api/tests/{test_id}/has-passed")]
async fn get_has_passed(
    state: web::Data<AppState>,
    test_id: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let has_passed = state.attempt_service.has_passed(&user.id, &test_id).await?;
    Ok(HttpResponse::Ok().json(HasPassedResponse { has_passed }))
}

#[get("/api/users/{user_id}/test-attempts")]
async fn get_attempt_history(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    params: web::Query<AttemptHistoryParams>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id.into_inner();
    if user.id != user_id && !user.is_admin() {
        return Err(AppError::Unauthorized(
            "Attempt history is only visible to its owner".to_string(),
        ));
    }

    let params = params.into_inner();
    params.validate()?;

    let (attempts, total) = state.attempt_service.attempt_history(&user_id, &params).await?;

    Ok(HttpResponse::Ok().json(AttemptHistoryResponse { attempts, total }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::USER_ID_HEADER;
    use crate::test_utils::test_helpers::assert_error_status;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn submit_endpoint_rejects_unidentified_caller() {
        let app = test::init_service(App::new().service(submit_attempt)).await;

        let req = test::TestRequest::post()
            .uri("/api/tests/t-1/submit")
            .set_json(serde_json::json!({ "answers": [] }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        // No identity header and no app state; either way this must not be a 2xx
        assert_error_status(resp.status());
    }

    #[actix_web::test]
    async fn history_endpoint_exists() {
        let app = test::init_service(App::new().service(get_attempt_history)).await;

        let req = test::TestRequest::get()
            .uri("/api/users/user-1/test-attempts")
            .insert_header((USER_ID_HEADER, "user-2"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }
}
