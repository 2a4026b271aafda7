//! Server bootstrap.

use crate::config::ServerConfig;
use crate::error::ApiResult;
use crate::http::router;
use crate::reconciler::SyncReconciler;
use crate::service::PosService;
use caja_core::{Clock, Store, SystemClock};
use std::sync::Arc;

/// Owns the store and serves the API over HTTP.
pub struct ApiServer {
    config: ServerConfig,
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl ApiServer {
    /// Creates a server with an empty store and the system clock.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(Store::new()))
    }

    /// Creates a server over an existing store, useful for seeding.
    pub fn with_store(config: ServerConfig, store: Arc<Store>) -> Self {
        Self {
            config,
            store,
            clock: Arc::new(SystemClock),
        }
    }

    /// Shared access to the underlying store.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Binds the configured address and serves until the task is
    /// cancelled.
    pub async fn run(self) -> ApiResult<()> {
        let service = PosService::new(
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            self.config.clone(),
        );
        let reconciler = SyncReconciler::new(
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            &self.config,
        );
        let app = router(service, reconciler);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "caja server listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
