pub mod catalog;
mod command;
pub mod export;
mod query;
pub(crate) mod repository;

pub use catalog::{Catalog, ImportReport, Ingredient, IngredientInput, Tag, TagInput};
pub use command::*;
pub use query::*;

pub(crate) fn now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
