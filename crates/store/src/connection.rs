//! MongoDB connection manager

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::model::{ItemDocument, ObjectMemberDocument};

pub const ITEMS_COLLECTION: &str = "items";
pub const OBJECT_MEMBER_COLLECTION: &str = "object_member";

/// Bound on connecting and the initial ping
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle to a single MongoDB database
#[derive(Clone, Debug)]
pub struct DocStore {
    client: Client,
    database: Database,
}

impl DocStore {
    /// Connect and verify liveness with a ping. Both steps share one `timeout` deadline.
    pub async fn connect(uri: &str, db_name: &str, timeout: Duration) -> Result<Self> {
        info!("Connecting to MongoDB database '{}'...", db_name);

        let connect = async {
            let mut options = ClientOptions::parse(uri).await?;
            options.connect_timeout = Some(timeout);
            options.server_selection_timeout = Some(timeout);
            let client = Client::with_options(options)?;

            let store = Self {
                database: client.database(db_name),
                client,
            };
            if let Err(e) = store.ping().await {
                warn!("MongoDB ping failed: {}", e);
                store.close().await;
                return Err(e);
            }
            Ok::<Self, StoreError>(store)
        };

        let store = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| StoreError::Timeout(timeout))??;

        info!("Successfully connected to MongoDB database '{}'", db_name);
        Ok(store)
    }

    /// Run the `ping` admin command against the database
    pub async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn items(&self) -> Collection<ItemDocument> {
        self.database.collection(ITEMS_COLLECTION)
    }

    pub fn object_members(&self) -> Collection<ObjectMemberDocument> {
        self.database.collection(OBJECT_MEMBER_COLLECTION)
    }

    /// Release the connection pool
    pub async fn close(self) {
        debug!("Closing MongoDB client");
        self.client.shutdown().await;
        info!("MongoDB connection closed");
    }
}
