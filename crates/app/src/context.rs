//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    auth::{AuthService, PgAuthService, Session},
    database::{self, Db},
    domain::{
        prices::{PgPricesService, PricesService},
        products::{PgProductsService, ProductsService},
    },
    live::{ChangeFeed, spawn_listener},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    #[error("failed to listen for changes")]
    Listen(#[source] sqlx::Error),
}

/// Services and shared state every surface of the app is built from.
#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub prices: Arc<dyn PricesService>,
    pub auth: Arc<dyn AuthService>,
    pub feed: ChangeFeed,
    pub session: Session,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("feed", &self.feed)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL and start forwarding
    /// change notifications until `shutdown` is cancelled.
    ///
    /// Pending migrations are applied before the listener starts.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or listening fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        shutdown: CancellationToken,
    ) -> Result<(Self, JoinHandle<()>), AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let feed = ChangeFeed::new();

        let listener = spawn_listener(&pool, feed.clone(), shutdown)
            .await
            .map_err(AppInitError::Listen)?;

        let db = Db::new(pool.clone());

        let context = Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            prices: Arc::new(PgPricesService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
            feed,
            session: Session::anonymous(),
        };

        Ok((context, listener))
    }
}
