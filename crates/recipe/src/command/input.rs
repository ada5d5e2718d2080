use std::collections::HashSet;

use foodgram_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use validator::{Validate, ValidationError};

pub const MAX_AMOUNT: i64 = 32_000;
pub const MAX_COOKING_TIME: i64 = 32_000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngredientAmount {
    pub id: i64,
    pub amount: i64,
}

/// Payload for creating or replacing a recipe. `image` is a base64 data URI,
/// required on create and optional on update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(
        length(min = 1, message = "At least one ingredient is required."),
        custom(function = "validate_ingredients")
    )]
    pub ingredients: Vec<IngredientAmount>,
    #[validate(
        length(min = 1, message = "At least one tag is required."),
        custom(function = "validate_tags")
    )]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(
        min = 1,
        max = MAX_COOKING_TIME,
        message = "Cooking time must be between 1 and 32000 minutes."
    ))]
    pub cooking_time: i64,
}

fn validate_ingredients(ingredients: &[IngredientAmount]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for ingredient in ingredients {
        if !(1..=MAX_AMOUNT).contains(&ingredient.amount) {
            return Err(ValidationError::new("amount").with_message(
                format!("Ingredient amount must be between 1 and {MAX_AMOUNT}.").into(),
            ));
        }

        if !seen.insert(ingredient.id) {
            return Err(ValidationError::new("duplicate")
                .with_message(format!("Ingredient {} is listed twice.", ingredient.id).into()));
        }
    }

    Ok(())
}

fn validate_tags(tags: &[i64]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    if let Some(tag) = tags.iter().find(|id| !seen.insert(**id)) {
        return Err(ValidationError::new("duplicate")
            .with_message(format!("Tag {tag} is listed twice.").into()));
    }

    Ok(())
}

async fn existing_ids<T>(
    pool: &SqlitePool,
    table: T,
    column: T,
    ids: Vec<i64>,
) -> foodgram_shared::Result<HashSet<i64>>
where
    T: sea_query::Iden + Clone + 'static,
{
    let statement = Query::select()
        .column(column.clone())
        .from(table)
        .and_where(Expr::col(column).is_in(ids))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let found: Vec<i64> = sqlx::query_scalar_with(&sql, values).fetch_all(pool).await?;

    Ok(found.into_iter().collect())
}

impl RecipeInput {
    /// Every referenced tag and ingredient must exist.
    pub(crate) async fn check_references(&self, pool: &SqlitePool) -> foodgram_shared::Result<()> {
        let tags = existing_ids(pool, Tag::Table, Tag::Id, self.tags.clone()).await?;
        if let Some(id) = self.tags.iter().find(|id| !tags.contains(id)) {
            foodgram_shared::bail!("tags", "Tag with id {id} does not exist.");
        }

        let ids = self.ingredients.iter().map(|i| i.id).collect::<Vec<_>>();
        let ingredients = existing_ids(pool, Ingredient::Table, Ingredient::Id, ids).await?;
        if let Some(ingredient) = self
            .ingredients
            .iter()
            .find(|i| !ingredients.contains(&i.id))
        {
            foodgram_shared::bail!(
                "ingredients",
                "Ingredient with id {} does not exist.",
                ingredient.id
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> RecipeInput {
        RecipeInput {
            ingredients: vec![IngredientAmount { id: 1, amount: 2 }],
            tags: vec![1],
            image: None,
            name: "Tea".to_owned(),
            text: "Boil water.".to_owned(),
            cooking_time: 5,
        }
    }

    fn failed_fields(input: &RecipeInput) -> Vec<String> {
        let mut fields = input
            .validate()
            .unwrap_err()
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect::<Vec<_>>();
        fields.sort();
        fields
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn empty_or_duplicate_tags_fail() {
        let mut empty = input();
        empty.tags.clear();
        assert_eq!(failed_fields(&empty), vec!["tags"]);

        let mut duplicate = input();
        duplicate.tags = vec![1, 2, 1];
        assert_eq!(failed_fields(&duplicate), vec!["tags"]);
    }

    #[test]
    fn zero_amount_and_duplicate_ingredients_fail() {
        let mut zero = input();
        zero.ingredients[0].amount = 0;
        assert_eq!(failed_fields(&zero), vec!["ingredients"]);

        let mut duplicate = input();
        duplicate
            .ingredients
            .push(IngredientAmount { id: 1, amount: 3 });
        assert_eq!(failed_fields(&duplicate), vec!["ingredients"]);
    }

    #[test]
    fn oversized_amount_and_cooking_time_fail() {
        let mut amount = input();
        amount.ingredients[0].amount = i64::MAX;
        assert_eq!(failed_fields(&amount), vec!["ingredients"]);

        let mut time = input();
        time.cooking_time = MAX_COOKING_TIME + 1;
        assert_eq!(failed_fields(&time), vec!["cooking_time"]);

        let mut edge = input();
        edge.ingredients[0].amount = MAX_AMOUNT;
        edge.cooking_time = MAX_COOKING_TIME;
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn cooking_time_must_be_positive() {
        let mut zero = input();
        zero.cooking_time = 0;
        zero.name.clear();
        assert_eq!(failed_fields(&zero), vec!["cooking_time", "name"]);
    }
}
