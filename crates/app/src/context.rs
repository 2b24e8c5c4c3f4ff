//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, DatabaseSettings, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    db: Option<Db>,
}

impl AppContext {
    /// Build application context from a database URL with default pool limits.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        Self::from_settings(&DatabaseSettings::new(url)).await
    }

    /// Build application context from explicit database settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with(settings)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Context with Postgres-backed services sharing one pool.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            carts: Arc::new(PgCartsService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone())),
            db: Some(db),
        }
    }

    /// Context over caller-supplied services, with no pool to close.
    #[must_use]
    pub fn from_services(
        carts: Arc<dyn CartsService>,
        catalog: Arc<dyn CatalogService>,
        users: Arc<dyn UsersService>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            carts,
            catalog,
            users,
            auth,
            db: None,
        }
    }

    /// Check that the database answers. Contexts without a pool are always healthy.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the pool cannot reach the database.
    pub async fn check_database(&self) -> Result<(), sqlx::Error> {
        match &self.db {
            Some(db) => db.ping().await,
            None => Ok(()),
        }
    }

    /// Release the database pool, if this context owns one.
    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}
