//! Tags and ingredients: the reference data recipes are built from.

use std::ops::Deref;

mod import;
mod ingredient;
mod tag;

pub use import::ImportReport;
pub use ingredient::{Ingredient, IngredientInput};
pub use tag::{Tag, TagInput};

#[derive(Clone)]
pub struct Catalog(pub foodgram_shared::State);

impl Deref for Catalog {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
