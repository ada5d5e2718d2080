use std::ops::Deref;

mod create;
mod delete;
mod input;
mod relation;
mod short_link;
mod update;

pub use input::{IngredientAmount, RecipeInput};
pub use relation::Relation;

/// Folder below the media root recipe images are written to.
pub(crate) const IMAGE_FOLDER: &str = "recipes/images";

#[derive(Clone)]
pub struct Command(pub foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
