//! HTTP server: REST resources, MCP over SSE, and the landing page

mod cors;
mod resources;

use anyhow::{Context, Result};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use stringly_core::{Config, NoteStore, Store};
use stringly_mcp::{McpServer, SseTransport};
use tower_http::trace::TraceLayer;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Stringly Typed Store</title></head>
  <body>
    <h1>Stringly Typed Store</h1>
    <p>Available endpoints:</p>
    <ul>
      <li><a href="/resources">/resources</a></li>
      <li><a href="/sse">/sse</a> (MCP over Server-Sent Events)</li>
    </ul>
  </body>
</html>
"#;

/// Build the full application router over one store
pub fn router(store: Store) -> Router {
    let mcp = SseTransport::new(McpServer::new(NoteStore::new(store.clone())));

    Router::new()
        .route("/", get(landing))
        .merge(resources::router(store))
        .merge(mcp.router())
        .layer(TraceLayer::new_for_http())
        .layer(cors::layer())
}

// GET /
async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Bind and serve until the process exits
pub async fn serve(config: &Config, store: Store) -> Result<()> {
    if config.https_enabled() {
        tracing::warn!("Local TLS is not supported by this build");
        tracing::warn!("Falling back to HTTP server...");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Stringly Typed Store listening on http://localhost:{}", config.port);

    axum::serve(listener, router(store))
        .await
        .context("Server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_landing_page() {
        let temp_dir = TempDir::new().unwrap();
        let app = router(Store::open(temp_dir.path()).unwrap());

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("<h1>Stringly Typed Store</h1>"));
        assert!(body.contains(r#"href="/resources""#));
    }

    #[tokio::test]
    async fn test_sse_routes_are_mounted() {
        let temp_dir = TempDir::new().unwrap();
        let app = router(Store::open(temp_dir.path()).unwrap());

        let response = app
            .oneshot(
                Request::post("/sse/messages")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_allows_localhost() {
        let temp_dir = TempDir::new().unwrap();
        let app = router(Store::open(temp_dir.path()).unwrap());

        let response = app
            .oneshot(
                Request::get("/resources")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
    }
}
