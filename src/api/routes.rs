use axum::{
    routing::post,
    Router,
    extract::{Json, State},
    response::IntoResponse,
};
use tower_http::cors::{CorsLayer, Any};
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::api::models::{ScrapeRequest, ScrapeResponse};
use crate::scraper::scrape_product;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/scrape", post(scrape_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn scrape_handler(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> impl IntoResponse {
    let start_time = std::time::Instant::now();

    let result = process_scrape_request(&state, &req).await;

    match result {
        Ok(response) => {
            info!(url = %req.url, elapsed = ?start_time.elapsed(), "scrape completed");
            Ok(Json(response))
        }
        Err(err) => {
            error!(url = %req.url, elapsed = ?start_time.elapsed(), "scrape failed: {}", err);
            Err(err)
        }
    }
}

async fn process_scrape_request(state: &AppState, req: &ScrapeRequest) -> Result<ScrapeResponse> {
    if req.url.trim().is_empty() {
        return Err(AppError::MissingUrl);
    }

    scrape_product(&state.config, &req.url).await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::AppState;
    use super::create_router;

    fn test_state() -> AppState {
        AppState {
            config: Arc::new(Config {
                server_addr: "127.0.0.1:0".parse().unwrap(),
                headless: true,
                image_dir: PathBuf::from("/tmp"),
            }),
        }
    }

    async fn post_scrape(body: &str) -> (StatusCode, serde_json::Value) {
        let app = create_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/scrape")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_url_field_yields_error_payload() {
        let (status, body) = post_scrape("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "URL não informada"}));
    }

    #[tokio::test]
    async fn empty_url_yields_error_payload() {
        let (status, body) = post_scrape(r#"{"url": "  "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "URL não informada"}));
    }

    #[tokio::test]
    async fn unsupported_domain_yields_error_payload_without_browser() {
        let (status, body) =
            post_scrape(r#"{"url": "https://www.magazineluiza.com.br/p/123"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, serde_json::json!({"error": "Plataforma não suportada"}));
    }
}
