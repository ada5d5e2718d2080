//! Database migration utilities

use sqlx::SqlitePool;
use sqlx_migrator::{Migrate, Plan};
use std::path::Path;

use crate::config::Config;

/// Apply every pending migration on `pool`.
pub async fn run(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(())
}

/// Run all database migrations
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Migrating database {}", config.database.url);

    let pool = crate::db::create_write_pool(&config.database.url).await?;
    run(&pool).await?;
    pool.close().await;

    tracing::info!("Database migrated");

    Ok(())
}

/// Drop the database file if it exists and run migrations
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let path = config
        .database
        .url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);

    for file in [path.to_owned(), format!("{path}-wal"), format!("{path}-shm")] {
        if !file.is_empty() && file != ":memory:" && Path::new(&file).exists() {
            std::fs::remove_file(&file)?;
            tracing::info!("Dropped database file: {}", file);
        }
    }

    migrate(config).await
}
