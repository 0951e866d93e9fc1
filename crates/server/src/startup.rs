use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::{AppConfig, AuthConfig, MediaConfig, ServerConfig};
use service::auth::repo::seaorm::SeaOrmAccountRepository;
use service::auth::{AccountService, CredentialConfig, CredentialService};
use service::employee::repo::seaorm::SeaOrmEmployeeRepository;
use service::employee::EmployeeDirectory;
use service::media::{CloudinaryHost, PhotoUploader, UploadConfig};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {}", e)))
}

pub fn credential_config(auth: &AuthConfig) -> CredentialConfig {
    CredentialConfig {
        jwt_secret: auth.jwt_secret.clone(),
        token_ttl: Duration::from_secs(auth.token_ttl_secs),
        hash_memory_kib: auth.hash_memory_kib,
        hash_iterations: auth.hash_iterations,
        hash_parallelism: auth.hash_parallelism,
    }
}

/// Cloudinary-backed uploader when `[media]` is complete, otherwise one that
/// rejects every photo.
pub fn photo_uploader(media: &MediaConfig) -> Result<PhotoUploader, StartupError> {
    let (Some(cloud_name), Some(upload_preset)) = (media.cloud_name.clone(), media.upload_preset.clone()) else {
        warn!("image host not configured; employee photos will be rejected");
        return Ok(PhotoUploader::disabled());
    };
    let host = CloudinaryHost::new(&UploadConfig {
        api_base: media.api_base.clone(),
        cloud_name,
        upload_preset,
        timeout: Duration::from_secs(media.timeout_secs),
    })
    .map_err(|e| StartupError::Runtime(e.to_string()))?;
    Ok(PhotoUploader::new(Arc::new(host), media.folder.clone()))
}

/// Wire the services over a live database connection.
pub fn build_state(cfg: &AppConfig, db: DatabaseConnection) -> Result<ServerState, StartupError> {
    if cfg.auth.jwt_secret.is_none() {
        warn!("JWT secret is not configured; logins will fail until it is set");
    }
    let credentials = CredentialService::new(credential_config(&cfg.auth))
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let accounts = AccountService::new(
        Arc::new(SeaOrmAccountRepository { db: db.clone() }),
        Arc::new(credentials),
    );
    let employees = EmployeeDirectory::new(
        Arc::new(SeaOrmEmployeeRepository { db }),
        Arc::new(photo_uploader(&cfg.media)?),
    );
    Ok(ServerState { accounts: Arc::new(accounts), employees: Arc::new(employees) })
}

/// Public entry: load config, prepare the database, and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Runtime(format!("migrations: {}", e)))?;
    info!("migrations applied");

    let state = build_state(&cfg, db)?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
