use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewUserAccount, UserAccount},
};

/// Inserts a new account and returns its id.
///
/// The `UNIQUE` constraint on `username` is the final arbiter of uniqueness, so two concurrent registrations for the
/// same name cannot both succeed. The loser gets [`SqliteDatabaseError::UsernameTaken`].
pub async fn insert_user(user: NewUserAccount, conn: &mut SqliteConnection) -> Result<i64, SqliteDatabaseError> {
    let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
        .bind(&user.username)
        .bind(&user.password_hash)
        .execute(conn)
        .await;
    match result {
        Ok(r) => {
            let id = r.last_insert_rowid();
            debug!("🧑️ Created user account #{id} for {}", user.username);
            Ok(id)
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            trace!("🧑️ Username {} is already taken", user.username);
            Err(SqliteDatabaseError::UsernameTaken(user.username))
        },
        Err(e) => Err(SqliteDatabaseError::AccountCreationError(e.to_string())),
    }
}

pub async fn user_by_username(
    username: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<UserAccount>, SqliteDatabaseError> {
    let user = sqlx::query_as::<_, UserAccount>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        WHERE username = $1"#,
    )
    .bind(username)
    .fetch_optional(conn)
    .await?;
    Ok(user)
}

pub async fn user_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<UserAccount>, SqliteDatabaseError> {
    let user = sqlx::query_as::<_, UserAccount>(
        r#"
        SELECT id, username, password_hash, created_at
        FROM users
        WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(user)
}
