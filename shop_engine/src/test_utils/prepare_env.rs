use log::*;

use crate::SqliteDatabase;

/// Loads `.env.test`, starts logging and returns a freshly migrated in-memory database.
///
/// The pool holds a single connection, because every new connection to `sqlite::memory:` opens a separate, empty
/// database.
pub async fn prepare_test_env() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    let db = SqliteDatabase::new_with_url("sqlite::memory:", 1).await.expect("Error creating in-memory database");
    db.run_migrations().await.expect("Error running DB migrations");
    db
}
