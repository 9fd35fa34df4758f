use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::database;
use crate::services::analysis::AnalysisService;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let pool = database::create_pool(&self.config.history.database_path)?;
        let service = AnalysisService::new(self.config.clone(), pool)?;

        let state = Arc::new(AppState { service });
        Self::spawn_cache_sweeper(Arc::clone(&state), self.config.fetch.cache_ttl_secs);

        let app = build_app(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    fn spawn_cache_sweeper(state: Arc<AppState>, ttl_secs: u64) {
        let period = Duration::from_secs(ttl_secs.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                state.service.purge_cache();
            }
        });
    }
}

pub fn build_app(state: Arc<AppState>) -> axum::Router {
    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
