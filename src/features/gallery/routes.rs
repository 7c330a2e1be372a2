use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::features::gallery::handlers;
use crate::features::gallery::services::GalleryService;

/// Create routes for the gallery: the JSON listing plus static artifact files
pub fn routes(service: Arc<GalleryService>, output_dir: &Path) -> Router {
    Router::new()
        .route("/gallery", get(handlers::list_gallery))
        .with_state(service)
        .nest_service("/output", ServeDir::new(output_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::generate::dtos::GenerateQrDto;
    use crate::shared::test_helpers::TestEnv;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server(env: &TestEnv) -> TestServer {
        TestServer::new(routes(Arc::new(env.gallery_service()), env.output_dir())).unwrap()
    }

    #[tokio::test]
    async fn test_gallery_lists_generated_artifacts() {
        let env = TestEnv::new().await;
        let generate = env.generate_service();
        for (filename, format) in [("a", "png"), ("b", "svg")] {
            generate
                .generate(GenerateQrDto {
                    url: Some("https://example.com".to_string()),
                    filename: Some(filename.to_string()),
                    format: Some(format.to_string()),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        std::fs::write(env.output_dir().join("stray.txt"), b"ignored").unwrap();
        let server = server(&env);

        let response = server.get("/gallery").await;

        response.assert_status_ok();
        let mut names: Vec<String> = response.json();
        names.sort();
        assert_eq!(names, vec!["a.png", "b.svg"]);
    }

    #[tokio::test]
    async fn test_gallery_empty() {
        let env = TestEnv::new().await;
        let server = server(&env);

        let response = server.get("/gallery").await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_gallery_unreadable_directory_is_500() {
        let env = TestEnv::new().await;
        let server = server(&env);
        std::fs::remove_dir_all(env.output_dir()).unwrap();

        let response = server.get("/gallery").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Failed to load gallery." }));
    }

    #[tokio::test]
    async fn test_output_serves_artifact_bytes() {
        let env = TestEnv::new().await;
        std::fs::write(env.output_dir().join("a.svg"), b"<svg>a</svg>").unwrap();
        let server = server(&env);

        let response = server.get("/output/a.svg").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "<svg>a</svg>");

        server
            .get("/output/missing.png")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
