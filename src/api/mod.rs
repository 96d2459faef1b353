//! HTTP API module
//! 
//! The storage endpoint: a single write route plus static files from the
//! public directory, which is where the saved document is read back from.

pub mod handlers;

use std::{path::PathBuf, sync::Arc};
use axum::{routing::post, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use handlers::*;

/// File name of the saved document inside the public directory
pub const DOCUMENT_FILE: &str = "timers.json";

/// Where the storage endpoint keeps its files
#[derive(Debug, Clone)]
pub struct StorageState {
    pub public_dir: PathBuf,
    pub document_path: PathBuf,
}

impl StorageState {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        let public_dir = public_dir.into();
        let document_path = public_dir.join(DOCUMENT_FILE);
        Self {
            public_dir,
            document_path,
        }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<StorageState>) -> Router {
    let static_files = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/timers", post(save_timers_handler))
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn router_in(dir: &TempDir) -> Router {
        create_router(Arc::new(StorageState::new(dir.path())))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post_timers(router: Router, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/timers")
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_document_absent_before_first_save() {
        let dir = TempDir::new().unwrap();
        let (status, _) = get(router_in(&dir), "/timers.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_save_then_read_back() {
        let dir = TempDir::new().unwrap();
        let document = r#"[{"title":"Timer 1","time":12,"rate":0,"started":false}]"#;

        let (status, body) = post_timers(router_in(&dir), document).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");

        let (status, body) = get(router_in(&dir), "/timers.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, document);
    }

    #[tokio::test]
    async fn test_save_overwrites_without_validation() {
        let dir = TempDir::new().unwrap();
        post_timers(router_in(&dir), "[1, 2, 3]").await;
        let (status, _) = post_timers(router_in(&dir), "not json at all").await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = get(router_in(&dir), "/timers.json").await;
        assert_eq!(body, "not json at all");
    }

    #[tokio::test]
    async fn test_other_static_files_are_served() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>timers</h1>").unwrap();

        let (status, body) = get(router_in(&dir), "/index.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>timers</h1>");
    }

    #[tokio::test]
    async fn test_write_failure_still_answers_ok() {
        let dir = TempDir::new().unwrap();
        let state = StorageState::new(dir.path().join("missing"));
        let document_path = state.document_path.clone();
        let router = create_router(Arc::new(state));

        let (status, body) = post_timers(router, "[]").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
        assert!(!document_path.exists());
    }
}
