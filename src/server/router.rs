use crate::server::handlers::api_prefix_guard;
use crate::server::types::ShimState;
use crate::utils::constants::SHIM_REQUEST_TIMEOUT_SECS;
use anyhow::{Error, bail};
use axum::Router;
use axum::middleware;
use std::time::Duration;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Static assets first, then the entry document for anything else outside `/api`.
pub fn build_router(state: &ShimState) -> Router {
    let assets = ServeDir::new(&state.dist_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(&state.entry_document));

    Router::new()
        .fallback_service(assets)
        .layer(middleware::from_fn(api_prefix_guard))
        .layer(TimeoutLayer::new(Duration::from_secs(SHIM_REQUEST_TIMEOUT_SECS)))
        .layer(TraceLayer::new_for_http())
}

pub fn check_assets(state: &ShimState) -> Result<(), Error> {
    if !state.dist_dir.is_dir() {
        bail!("asset directory {} does not exist", state.dist_dir.display());
    }
    if !state.entry_document.is_file() {
        bail!(
            "entry document {} is missing; build the front end first",
            state.entry_document.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build_router, check_assets};
    use crate::server::types::ShimState;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    const INDEX: &str = "<!doctype html><div id=\"root\"></div>";

    fn dist() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/app.js"), "console.log(1)").unwrap();
        // a real file under the api prefix must still not be served
        std::fs::write(dir.path().join("api.json"), "{}").unwrap();
        dir
    }

    async fn get(state: &ShimState, path: &str) -> (StatusCode, String) {
        let response = build_router(state)
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[tokio::test]
    async fn serves_existing_assets() {
        let dir = dist();
        let state = ShimState::new(dir.path(), "index.html");
        assert_eq!(
            get(&state, "/assets/app.js").await,
            (StatusCode::OK, "console.log(1)".to_string())
        );
        assert_eq!(get(&state, "/").await, (StatusCode::OK, INDEX.to_string()));
    }

    #[tokio::test]
    async fn client_routes_get_the_entry_document() {
        let dir = dist();
        let state = ShimState::new(dir.path(), "index.html");
        assert_eq!(get(&state, "/upload").await, (StatusCode::OK, INDEX.to_string()));
        assert_eq!(
            get(&state, "/deep/client/route?x=1").await,
            (StatusCode::OK, INDEX.to_string())
        );
        assert_eq!(
            get(&state, "/assets/missing.js").await,
            (StatusCode::OK, INDEX.to_string())
        );
    }

    #[tokio::test]
    async fn api_paths_are_never_rewritten() {
        let dir = dist();
        let state = ShimState::new(dir.path(), "index.html");
        for path in [
            "/api",
            "/api/",
            "/api/upload-excel",
            "/api/a/b/c",
            "/apiary",
            "/api-docs",
            "/api.json",
        ] {
            let (status, body) = get(&state, path).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
            assert!(body.contains("\"success\":false"), "{}", body);
        }

        let response = build_router(&state)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/validate-password")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_entry_document_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let state = ShimState::new(dir.path(), "index.html");
        assert!(check_assets(&state).is_err());

        std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        assert!(check_assets(&state).is_ok());
        assert!(check_assets(&ShimState::new(&dir.path().join("nope"), "index.html")).is_err());
    }
}
