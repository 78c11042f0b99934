//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered
//! by the auth crate.

mod seed;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::{AuthConfig, MemoryDirectory, user_router};
use axum::{
    Router, http,
    http::{HeaderName, Method, header},
};
use platform::cache::MemoryCache;
use platform::cipher::AesGcmCipher;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,platform=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AuthConfig::default();

    // Password cipher key
    let cipher = match env::var("PASSWORD_CIPHER_KEY") {
        Ok(key) => AesGcmCipher::from_base64(&key).context("PASSWORD_CIPHER_KEY is invalid")?,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("PASSWORD_CIPHER_KEY not set, using a random development key");
            AesGcmCipher::generate()
        }
        Err(_) => anyhow::bail!("PASSWORD_CIPHER_KEY must be set in production"),
    };

    // User directory
    let directory = MemoryDirectory::new();
    let admin_password =
        env::var("ADMIN_PASSWORD").unwrap_or_else(|_| config.default_password.clone());
    seed::seed_directory(&directory, &cipher, &admin_password)
        .await
        .context("failed to seed the user directory")?;

    // Session cache with periodic purge of expired entries
    let cache = Arc::new(MemoryCache::new());
    let purge_interval = env::var("CACHE_PURGE_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(300);
    spawn_cache_purge(cache.clone(), Duration::from_secs(purge_interval));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8080,http://127.0.0.1:8080".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let token_header = HeaderName::try_from(config.token_header.as_str())
        .context("token header name is invalid")?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            token_header,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/user", user_router(directory, cache, cipher, config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8012".to_string())
        .parse()
        .context("BIND_ADDR is not a valid socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn spawn_cache_purge(cache: Arc<MemoryCache>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired sessions");
            }
        }
    });
}
