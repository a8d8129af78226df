pub mod db;
mod errors;

pub mod user_accounts;

pub use db::SqliteDatabase;
pub use errors::SqliteDatabaseError;
use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

pub const SQLITE_DB_URL: &str = "sqlite://data/shop.db";

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqliteDatabaseError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates the database file at `url` if it does not exist yet. An existing database is left untouched.
pub async fn create_database_if_missing(url: &str) -> Result<(), SqliteDatabaseError> {
    if !Sqlite::database_exists(url).await? {
        Sqlite::create_database(url).await?;
        info!("🗃️ Created Sqlite database {url}");
    }
    Ok(())
}
