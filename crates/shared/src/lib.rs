mod error;
pub mod image;
pub mod page;
pub mod permission;

pub use error::*;
pub use image::MediaStore;
pub use page::{Page, PageArgs};
pub use permission::Caller;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
    pub media: MediaStore,
}
