use crate::server::types::ApiErrorResponse;
use crate::utils::constants::API_PREFIX;
use axum::Json;
use axum::extract::Request;
use axum::http::{StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

pub async fn api_not_found_handler(uri: Uri) -> impl IntoResponse {
    tracing::debug!("no api route for {}", uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse {
            success: false,
            message: "Not found.".to_string(),
        }),
    )
}

// anything starting with /api never falls through to assets or the entry document
pub async fn api_prefix_guard(req: Request, next: Next) -> Response {
    if req.uri().path().starts_with(API_PREFIX) {
        return api_not_found_handler(req.uri().clone()).await.into_response();
    }
    next.run(req).await
}
