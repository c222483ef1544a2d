//! # Server Setup
//!
//! Tracing initialization, route registration, and HTTP server startup.

// region: --- Imports
use axum::{
    extract::FromRef,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use lib_core::model::store::run_migrations;
use lib_core::{create_pool, Config, DbPool};
use lib_utils::get_env_or;
use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp, AUTH_TOKEN_HEADER};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self { db, config }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
// endregion: --- AppState

// region: --- Server Setup
/// Install the global tracing subscriber.
///
/// The filter comes from `LOG_LEVEL` (e.g. `debug`, or a full directive such
/// as `lib_web=debug,sqlx=warn`), defaulting to `info`.
pub fn init_tracing() -> anyhow::Result<()> {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!(" Log level: {}", log_level);
    Ok(())
}

/// Connect the store, apply migrations, and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// - Database connection or migration fails
/// - The listener cannot bind `config.bind_address()`
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!(" POSTBOARD BACKEND STARTING");
    info!("Database URL: {}", config.database_url);

    // Ensure data directory exists for file-backed SQLite databases
    if let Some(db_path) = config.database_url.strip_prefix("sqlite:") {
        let db_path = db_path.trim_start_matches("//");
        if !db_path.starts_with(":memory:") {
            if let Some(parent) = std::path::Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                    info!("Created database directory: {:?}", parent);
                }
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&config.database_url).await?;

    info!(" Running database migrations...");
    run_migrations(&pool).await?;
    info!(" Migrations complete");

    let bind_address = config.bind_address();
    let app = create_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(" SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/", get(|| async { "API Running" }))
        .route(
            "/api/auth",
            get(handlers::auth::get_current_user).post(handlers::auth::login),
        )
        .route("/api/users", post(handlers::users::register))
        .route(
            "/api/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/api/posts/{id}",
            get(handlers::posts::get_post).delete(handlers::posts::delete_post),
        )
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        // Comprehensive request/response logging
        .layer(from_fn(log_requests))
        // Tower HTTP trace layer for spans
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        // Request stamping wraps logging and tracing so both see the id
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Any origin when none are configured, otherwise only the listed ones.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let headers = [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        HeaderName::from_static(AUTH_TOKEN_HEADER),
    ];

    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring unparsable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /api/auth");
    info!("   • GET  /api/auth            (x-auth-token)");
    info!(" USERS:");
    info!("   • POST /api/users");
    info!(" POSTS:");
    info!("   • GET  /api/posts");
    info!("   • POST /api/posts           (x-auth-token)");
    info!("   • GET  /api/posts/{{id}}");
    info!("   • DELETE /api/posts/{{id}}    (x-auth-token)");
}
// endregion: --- Server Setup

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::REQUEST_ID_HEADER;
    use crate::test_utils::{dispatch, test_app, test_config};
    use axum::body::Body;
    use axum::http::Request;

    fn root_request(request_id: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://localhost:3000");
        if let Some(id) = request_id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_router_echoes_request_id_and_allows_any_origin() {
        let (app, _pool) = test_app().await;

        let (status, headers, body) = dispatch(&app, root_request(Some("req-123"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "API Running");
        assert_eq!(headers[REQUEST_ID_HEADER], "req-123");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_router_generates_request_id_when_absent() {
        let (app, _pool) = test_app().await;

        let (_, headers, _) = dispatch(&app, root_request(None)).await;

        let id = headers[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_router_cors_honours_configured_origins() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let config = Config {
            cors_origins: vec!["http://allowed.example".to_string()],
            ..test_config()
        };
        let app = create_router(AppState::new(pool, config));

        let (_, headers, _) = dispatch(&app, root_request(None)).await;
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());

        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://allowed.example")
            .body(Body::empty())
            .unwrap();
        let (_, headers, _) = dispatch(&app, request).await;
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://allowed.example");
    }
}
