use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::generate::handlers;
use crate::features::generate::services::GenerateService;

/// Create routes for the single generation feature
pub fn routes(service: Arc<GenerateService>) -> Router {
    Router::new()
        .route("/generate", post(handlers::generate_qr))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::qr::{QrRenderer, RenderDefaults, RenderOptions};
    use crate::shared::test_helpers::TestEnv;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server(env: &TestEnv) -> TestServer {
        TestServer::new(routes(Arc::new(env.generate_service()))).unwrap()
    }

    #[tokio::test]
    async fn test_generate_svg_from_form() {
        let env = TestEnv::new().await;
        let server = server(&env);

        let response = server
            .post("/generate")
            .form(&[
                ("url", "https://example.com"),
                ("filename", "a"),
                ("format", "svg"),
                ("width", "150"),
                ("colorDark", "#111111"),
                ("colorLight", "#eeeeee"),
            ])
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "success": true, "download": "a.svg" }));

        let svg = std::fs::read_to_string(env.output_dir().join("a.svg")).unwrap();
        assert!(svg.contains(r#"width="150" height="150""#));
        assert!(svg.contains("#111111"));
        assert!(svg.contains("#eeeeee"));
    }

    #[tokio::test]
    async fn test_generate_png_from_json_with_numeric_width() {
        let env = TestEnv::new().await;
        let server = server(&env);

        let response = server
            .post("/generate")
            .json(&json!({
                "url": "https://example.com",
                "filename": "a",
                "format": "png",
                "width": 150,
                "colorDark": "#111111",
                "colorLight": "#eeeeee"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["download"], "a.png");

        let img = image::open(env.output_dir().join("a.png")).unwrap();
        assert_eq!((img.width(), img.height()), (150, 150));
    }

    #[tokio::test]
    async fn test_generate_overwrites_existing_artifact() {
        let env = TestEnv::new().await;
        let server = server(&env);

        for url in ["https://first.example", "https://second.example/longer/path"] {
            server
                .post("/generate")
                .form(&[("url", url), ("filename", "same"), ("format", "svg")])
                .await
                .assert_status_ok();
        }

        let defaults = RenderOptions::resolve(&RenderDefaults::default(), None, None, None).unwrap();
        let expected = QrRenderer::new()
            .render_svg("https://second.example/longer/path", &defaults)
            .unwrap();
        let stored = std::fs::read_to_string(env.output_dir().join("same.svg")).unwrap();
        assert_eq!(stored, expected);
        assert_eq!(env.artifact_names().await, vec!["same.svg"]);
    }

    #[tokio::test]
    async fn test_generate_missing_url_is_json_error() {
        let env = TestEnv::new().await;
        let server = server(&env);

        let response = server
            .post("/generate")
            .form(&[("filename", "a")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("url is required"));
    }

    #[tokio::test]
    async fn test_generate_rejects_path_like_filename() {
        let env = TestEnv::new().await;
        let server = server(&env);

        let response = server
            .post("/generate")
            .form(&[("url", "https://example.com"), ("filename", "../a")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(env.artifact_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_render_failure_is_500_json() {
        let env = TestEnv::new().await;
        let server = server(&env);
        let payload = "x".repeat(3000);

        let response = server
            .post("/generate")
            .form(&[("url", payload.as_str()), ("filename", "big")])
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Failed to generate QR code." }));
    }
}
