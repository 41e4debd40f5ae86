//! Service lifecycle: connect, serve, drain, close

use anyhow::{Result, anyhow};
use std::future::Future;
use std::sync::Arc;
use store::{DocStore, MongoItemRepository, MongoObjectMemberRepository};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::{ServiceConfig, mask_uri};
use crate::routes;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;

/// Owns the store connection and the handler state for one server run
pub struct ApiServiceRunner {
    config: ServiceConfig,
    store: Option<DocStore>,
    state: AppState,
}

impl ApiServiceRunner {
    /// Connect to MongoDB and build the repositories.
    ///
    /// A failed connection does not abort startup: the runner comes up in
    /// degraded mode and every data route answers 503.
    pub async fn new(config: ServiceConfig) -> Self {
        match open_store(&config).await {
            Ok((store, state)) => Self {
                config,
                store: Some(store),
                state,
            },
            Err(e) => {
                error!("MongoDB: {} (server starting without database)", e);
                Self {
                    config,
                    store: None,
                    state: AppState::degraded(),
                }
            }
        }
    }

    /// Runner over caller-provided repositories; no store connection is owned
    pub fn with_state(config: ServiceConfig, state: AppState) -> Self {
        Self {
            config,
            store: None,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Serve until CTRL+C or SIGTERM
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.listen_addr)
            .await
            .map_err(|e| anyhow!("Failed to bind {}: {}", self.config.listen_addr, e))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener. In-flight requests are drained
    /// after `shutdown` resolves, then the store connection is closed.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Server listening on {}", listener.local_addr()?);
        if self.state.is_degraded() {
            warn!("Running without database - data routes will answer 503");
        }

        let app = routes::app(self.state.clone(), self.config.request_timeout);
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        info!("HTTP server stopped");
        self.close().await;

        served.map_err(|e| anyhow!("Server error: {}", e))
    }

    async fn close(self) {
        if let Some(store) = self.store {
            store.close().await;
        }
    }
}

async fn open_store(config: &ServiceConfig) -> Result<(DocStore, AppState)> {
    info!("MongoDB URI: {}", mask_uri(&config.mongo_uri));
    let store = DocStore::connect(&config.mongo_uri, &config.mongo_db, config.connect_timeout)
        .await?;

    let object_members = match MongoObjectMemberRepository::new(&store).await {
        Ok(repository) => repository,
        Err(e) => {
            store.close().await;
            return Err(anyhow!("Failed to prepare object_member collection: {}", e));
        }
    };
    let items = MongoItemRepository::new(&store);

    let state = AppState::new(Arc::new(items), Arc::new(object_members));
    Ok((store, state))
}
