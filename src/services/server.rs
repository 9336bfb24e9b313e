use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::info;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::cache::TtlCache;
use crate::config::settings::AppConfig;
use crate::database;
use crate::fetchers::ResultsClient;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let db_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "jablonec_chess_results.db".to_string());

        let pool = database::create_pool(&db_path)?;
        {
            let mut conn = database::get_connection(&pool)?;
            database::setup::init_schema(&mut conn)?;
        }

        let ttl = Duration::from_secs(self.config.cache.ttl_secs);
        let capacity = self.config.cache.capacity;
        let state = Arc::new(AppState {
            pool,
            client: ResultsClient::new(&self.config)?,
            boards_cache: TtlCache::new(ttl, capacity),
            roster_cache: TtlCache::new(ttl, capacity),
            config: self.config.clone(),
        });

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
