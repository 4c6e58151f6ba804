#![allow(dead_code)]

use commerce_models::{
    audit::Actor,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    state::AppState,
};
use uuid::Uuid;

/// A fresh in-memory database with every migration applied.
///
/// One connection only: each SQLite memory connection is its own database.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
        sqlx_logging: false,
    };
    let orm = create_orm_conn(&config).await?;
    run_migrations(&orm).await?;
    Ok(AppState { orm })
}

pub fn actor() -> Actor {
    Actor::new(Uuid::now_v7())
}
