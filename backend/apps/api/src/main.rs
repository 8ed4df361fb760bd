//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::middleware::{AuthMiddlewareState, RouteRules, authenticate_request, authorize_request};
use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use documents::{DocumentConfig, PgDocumentRepository, documents_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod seed;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Request bodies above this are cut off by axum before the upload
/// validation runs; kept above the 10 MiB domain limit so oversized
/// files surface the domain error, not a blunt 413.
const BODY_LIMIT_BYTES: usize = 12 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,documents=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = Arc::new(load_auth_config()?);

    // Documents configuration
    let document_config = DocumentConfig::with_upload_dir(
        env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
    );

    let auth_repo = PgAuthRepository::new(pool.clone());
    let doc_repo = PgDocumentRepository::new(pool.clone());

    // Startup seed: demo accounts for local use
    // Errors here should not prevent server startup
    if env::var("SEED_DEMO_DATA").map(|v| v == "true").unwrap_or(false) {
        match seed::seed_demo_data(&auth_repo, &auth_config).await {
            Ok(true) => tracing::info!("Demo data created"),
            Ok(false) => tracing::info!("Demo data already present, skipping"),
            Err(e) => {
                tracing::warn!(error = %e, "Demo data seeding failed, continuing anyway");
            }
        }
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Request pipeline: the bearer middleware attaches the principal,
    // then the guard enforces the route table. Login lives under the
    // public prefix and short-circuits in its own handler.
    let auth_state = AuthMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        config: auth_config.clone(),
    };
    let rules = Arc::new(RouteRules::api_defaults());

    let app = Router::new()
        .nest("/api/auth", auth_router(auth_repo.clone(), auth_config.clone()))
        .nest(
            "/api/documents",
            documents_router(auth_repo, doc_repo, document_config),
        )
        .layer(middleware::from_fn(move |req, next| {
            authorize_request(rules.clone(), req, next)
        }))
        .layer(middleware::from_fn(move |req, next| {
            authenticate_request(auth_state.clone(), req, next)
        }))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Token secret and TTL from the environment
///
/// Production requires `AUTH_TOKEN_SECRET` (base64, 32 bytes); debug
/// builds fall back to a random per-process secret.
fn load_auth_config() -> anyhow::Result<AuthConfig> {
    let token_ttl = env::var("AUTH_TOKEN_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs);

    match env::var("AUTH_TOKEN_SECRET") {
        Ok(secret_b64) => {
            let secret_bytes = platform::crypto::from_base64(&secret_b64)?;
            if secret_bytes.len() != 32 {
                anyhow::bail!("AUTH_TOKEN_SECRET must decode to exactly 32 bytes");
            }
            let mut secret = [0u8; 32];
            secret.copy_from_slice(&secret_bytes);

            let mut config = AuthConfig {
                token_secret: secret,
                ..Default::default()
            };
            if let Some(ttl) = token_ttl {
                config.token_ttl = ttl;
            }
            Ok(config)
        }
        Err(_) => {
            if cfg!(debug_assertions) {
                tracing::warn!("AUTH_TOKEN_SECRET not set, using a random development secret");
                let mut config = AuthConfig::development();
                if let Some(ttl) = token_ttl {
                    config.token_ttl = ttl;
                }
                Ok(config)
            } else {
                anyhow::bail!("AUTH_TOKEN_SECRET must be set in production")
            }
        }
    }
}
