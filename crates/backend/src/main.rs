use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct ServerConfig {
    port: u16,
    dist_dir: PathBuf,
    assets_dir: PathBuf,
}

impl ServerConfig {
    fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .with_context(|| format!("PORT must be a port number, got {p:?}"))?,
            None => 3000,
        };
        Ok(Self {
            port,
            dist_dir: PathBuf::from(lookup("DIST_DIR").unwrap_or_else(|| "dist".to_string())),
            assets_dir: PathBuf::from(lookup("ASSETS_DIR").unwrap_or_else(|| "assets".to_string())),
        })
    }
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(config: Arc<ServerConfig>) -> Router {
    // Static file routers are stateless, so merge them before adding app state
    let static_files = Router::new()
        .nest(
            "/static",
            cached_static_router(&config.assets_dir, CACHE_1DAY),
        )
        .nest(
            "/dist",
            cached_static_router(&config.dist_dir, CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route("/", get(serve_index))
        .route("/healthz", get(healthz))
        .with_state(config)
        .merge(static_files)
        .layer(CompressionLayer::new())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn serve_index(State(config): State<Arc<ServerConfig>>) -> Html<String> {
    // Serve the built frontend, or a hint when it has not been built yet
    let index = config.dist_dir.join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::warn!(path = %index.display(), error = %e, "Frontend bundle missing");
            Html(
                r#"<!DOCTYPE html>
<html>
<head><title>Meshtastic Coverage Planner</title></head>
<body>
<h1>Meshtastic Coverage Planner</h1>
<p>Frontend not built yet. Run <code>dx bundle</code> in <code>crates/frontend</code> and point <code>DIST_DIR</code> at the output.</p>
</body>
</html>"#
                    .to_string(),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(ServerConfig::from_env()?);
    let app = build_app(config.clone());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        port = config.port,
        dist = %config.dist_dir.display(),
        "Serving coverage planner at http://localhost:{}",
        config.port
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Create a temp dir with a test file and return the dir path.
    fn temp_dir_with_file(file_name: &str, content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(file_name), content).unwrap();
        dir
    }

    fn test_config(dist: &Path, assets: &Path) -> Arc<ServerConfig> {
        Arc::new(ServerConfig {
            port: 0,
            dist_dir: dist.to_path_buf(),
            assets_dir: assets.to_path_buf(),
        })
    }

    async fn get_path(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".to_string()),
            "DIST_DIR" => Some("/srv/planner".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.dist_dir, PathBuf::from("/srv/planner"));
    }

    #[test]
    fn test_config_rejects_bad_port() {
        let err = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[tokio::test]
    async fn test_index_serves_built_frontend() {
        let dist = temp_dir_with_file("index.html", "<html>planner</html>");
        let assets = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist.path(), assets.path()));

        let resp = get_path(app, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "<html>planner</html>");
    }

    #[tokio::test]
    async fn test_index_falls_back_when_not_built() {
        let dist = tempfile::tempdir().unwrap();
        let assets = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist.path(), assets.path()));

        let resp = get_path(app, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_healthz() {
        let dist = tempfile::tempdir().unwrap();
        let assets = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist.path(), assets.path()));

        let resp = get_path(app, "/healthz").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "ok");
    }

    #[tokio::test]
    async fn test_static_assets_have_1day_cache() {
        let dist = tempfile::tempdir().unwrap();
        let assets = temp_dir_with_file("favicon.svg", "<svg/>");
        let app = build_app(test_config(dist.path(), assets.path()));

        let resp = get_path(app, "/static/favicon.svg").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_dist_bundles_have_immutable_cache() {
        let dist = temp_dir_with_file("meshplanner-abc123.wasm", "wasm");
        let assets = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist.path(), assets.path()));

        let resp = get_path(app, "/dist/meshplanner-abc123.wasm").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_dist_assets_have_immutable_cache() {
        let dist = tempfile::tempdir().unwrap();
        std::fs::create_dir(dist.path().join("assets")).unwrap();
        std::fs::write(dist.path().join("assets").join("main-xyz.css"), "body{}").unwrap();
        let assets = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist.path(), assets.path()));

        let resp = get_path(app, "/assets/main-xyz.css").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let dist = tempfile::tempdir().unwrap();
        let assets = temp_dir_with_file("favicon.svg", "<svg/>");
        let app = build_app(test_config(dist.path(), assets.path()));

        let resp = get_path(app, "/static/nonexistent.txt").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
