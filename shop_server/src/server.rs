use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use shop_engine::{auth::Argon2Hasher, CredentialApi, SqliteDatabase, SqliteDatabaseError};

use crate::{
    auth::{build_password_hasher, build_token_codec},
    config::ServerConfig,
    errors::ServerError,
    middleware::SessionGateFactory,
    routes::{health, json_config, protected, LoginRoute, MeRoute, RegisterRoute},
};

const MAX_DB_CONNECTIONS: u32 = 25;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = open_database(&config).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

async fn open_database(config: &ServerConfig) -> Result<SqliteDatabase, SqliteDatabaseError> {
    if config.create_database {
        return SqliteDatabase::open(&config.database_url, MAX_DB_CONNECTIONS).await;
    }
    let db = SqliteDatabase::new_with_url(&config.database_url, MAX_DB_CONNECTIONS).await?;
    db.run_migrations().await?;
    Ok(db)
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    // Built once and shared by every worker
    let codec = build_token_codec(&config.auth);
    let hasher = Arc::new(build_password_hasher(&config.auth)?);
    info!("💻️ Session tokens are valid for {} hours", config.auth.token_ttl.num_hours());
    let srv = HttpServer::new(move || {
        let credential_api = CredentialApi::new(db.clone(), Arc::clone(&hasher), Arc::clone(&codec));
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("shop::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(credential_api));
        // Routes that require authentication
        let auth_scope = web::scope("/api")
            .wrap(SessionGateFactory::new(Arc::clone(&codec)))
            .service(protected)
            .service(MeRoute::<SqliteDatabase, Argon2Hasher>::new());
        app.service(health)
            .service(RegisterRoute::<SqliteDatabase, Argon2Hasher>::new())
            .service(LoginRoute::<SqliteDatabase, Argon2Hasher>::new())
            .service(auth_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
