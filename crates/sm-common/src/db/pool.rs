use deadpool_postgres::{
    Config, CreatePoolError, ManagerConfig, Pool, PoolError, RecyclingMethod, Runtime,
};
use std::str::FromStr;
use thiserror::Error;
use tokio_postgres::NoTls;
use tracing::info;

pub type PgPool = Pool;

#[derive(Debug, Error)]
pub enum DbPoolError {
    #[error("invalid database url: {0}")]
    InvalidConfig(String),
    #[error("failed to create database pool: {0}")]
    PoolCreation(#[from] CreatePoolError),
    #[error("failed to check out a connection: {0}")]
    Connect(#[from] PoolError),
    #[error("database ping failed: {0}")]
    Ping(#[from] tokio_postgres::Error),
}

/// Build a pool without opening any connection.
pub fn create_pool_from_url(db_url: &str) -> Result<PgPool, DbPoolError> {
    let _ = tokio_postgres::Config::from_str(db_url)
        .map_err(|e| DbPoolError::InvalidConfig(e.to_string()))?;

    let mut cfg = Config::new();
    cfg.url = Some(db_url.to_string());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(DbPoolError::PoolCreation)
}

/// Build a pool and make sure the database answers before returning it.
pub async fn create_pool_from_url_checked(db_url: &str) -> Result<PgPool, DbPoolError> {
    let pool = create_pool_from_url(db_url)?;
    let client = pool.get().await?;
    client.simple_query("SELECT 1").await?;
    info!(max_size = pool.status().max_size, "database pool ready");
    Ok(pool)
}
