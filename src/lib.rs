pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod migrate;
pub mod observability;
pub mod routes;
pub mod server;

pub use config::Config;
pub use db::{create_pool, create_read_pool, create_write_pool};
pub use routes::{AppState, router};

/// Shared state over a read and a write pool with media stored below
/// the configured root.
pub fn shared_state(
    config: &Config,
    read_db: sqlx::SqlitePool,
    write_db: sqlx::SqlitePool,
) -> foodgram_shared::State {
    foodgram_shared::State {
        read_db,
        write_db,
        media: foodgram_shared::MediaStore::new(&config.media.root, "/media"),
    }
}
