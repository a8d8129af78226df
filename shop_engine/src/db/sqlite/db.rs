use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::{create_database_if_missing, new_pool, user_accounts, SqliteDatabaseError};
use crate::{
    db::traits::{UserApiError, UserManagement},
    db_types::{NewUserAccount, UserAccount},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl UserManagement for SqliteDatabase {
    async fn create_user(&self, user: NewUserAccount) -> Result<i64, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        let id = user_accounts::insert_user(user, &mut conn).await?;
        Ok(id)
    }

    async fn fetch_user_by_username(&self, username: &str) -> Result<Option<UserAccount>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = user_accounts::user_by_username(username, &mut conn).await?;
        Ok(user)
    }

    async fn fetch_user_by_id(&self, id: i64) -> Result<Option<UserAccount>, UserApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = user_accounts::user_by_id(id, &mut conn).await?;
        Ok(user)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let pool = new_pool(url, max_connections).await?;
        trace!("🗃️ Connected to {url} with up to {max_connections} connections");
        Ok(Self { url: url.to_string(), pool })
    }

    /// Creates the database file when it is missing, connects to it, and brings the schema up to date.
    pub async fn open(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        create_database_if_missing(url).await?;
        let db = Self::new_with_url(url, max_connections).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    pub async fn run_migrations(&self) -> Result<(), SqliteDatabaseError> {
        migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }
}
