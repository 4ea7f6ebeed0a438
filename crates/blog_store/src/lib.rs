use std::net::SocketAddr;
use axum::{routing::get, Router};
use blog_core::Result;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

pub mod config;
pub mod handlers;
pub mod state;
pub mod storage;

pub use config::{StoreConfig, DEFAULT_PORT};
pub use state::AppState;
pub use storage::MemoryStore;

/// Routes for `GET/POST /{resource}` and `GET /{resource}/:id`.
pub fn create_app(state: AppState, resource: &str) -> Router {
    let resource = resource.trim_matches('/');
    let cors = CorsLayer::permissive();

    Router::new()
        .route(
            &format!("/{}", resource),
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(&format!("/{}/:id", resource), get(handlers::get_article))
        .layer(cors)
        .with_state(state)
}

/// Runs the store until the process is stopped.
pub async fn run(config: StoreConfig) -> Result<()> {
    let store = match &config.seed {
        Some(path) => MemoryStore::from_seed_file(path, &config.resource).await?,
        None => MemoryStore::new(),
    };
    let listener = TcpListener::bind(config.addr()).await?;
    info!(
        "🗄️  Article store listening on http://{}/{}",
        listener.local_addr()?,
        config.resource
    );
    axum::serve(listener, create_app(AppState::new(store), &config.resource)).await?;
    Ok(())
}

/// Serves `store` on an ephemeral localhost port in the background.
pub async fn spawn(store: MemoryStore, resource: &str) -> Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let addr = listener.local_addr()?;
    let app = create_app(AppState::new(store), resource);
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Article store stopped: {}", e);
        }
    });
    Ok((addr, handle))
}

pub mod prelude {
    pub use crate::{AppState, MemoryStore, StoreConfig};
    pub use blog_core::{Article, ArticleId, ArticleInput, Error, Result};
}
