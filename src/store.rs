use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::models::{activity_types, users, ActivityType, User};

#[derive(Debug, thiserror::Error)]
pub enum DatastoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Lookups the route handlers depend on.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn get_activity_types(&self) -> Result<Vec<ActivityType>, DatastoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DatastoreError>;
}

/// Opens the pool and brings the schema up to date.
pub async fn connect(database_url: &str) -> Result<SqlitePool, DatastoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let db = pool_options(is_in_memory(database_url))
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&db).await?;

    Ok(db)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn pool_options(in_memory: bool) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new().min_connections(1);
    if !in_memory {
        return options;
    }

    // the shared in-memory database is dropped with its last connection,
    // so that connection must never be reaped
    options.idle_timeout(None).max_lifetime(None)
}

#[derive(Debug, Clone)]
pub struct Backend {
    db: SqlitePool,
}

impl Backend {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Datastore for Backend {
    async fn get_activity_types(&self) -> Result<Vec<ActivityType>, DatastoreError> {
        Ok(activity_types::all(&self.db).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DatastoreError> {
        Ok(users::find_by_username(&self.db, username).await?)
    }
}
