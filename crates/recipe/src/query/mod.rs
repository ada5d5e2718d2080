use std::{collections::HashMap, ops::Deref};

use foodgram_db::table::{Ingredient, Recipe, RecipeIngredient, RecipeTag, Tag as TagTable};
use foodgram_shared::Caller;
use foodgram_user::Profile;
use sea_query::{
    Alias, Expr, ExprTrait, JoinType, Order, Query as Select, SelectStatement, SimpleExpr,
    SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use crate::Tag;

mod author;
mod cart;
mod list;
mod short_link;

pub use author::AuthorView;
pub use list::{RecipeFilter, parse_flag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientLine {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: i64,
    pub tags: Vec<Tag>,
    pub author: Profile,
    pub ingredients: Vec<IngredientLine>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

/// Short form returned by favorite, cart and subscription endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

#[derive(Debug, FromRow)]
struct RecipeRow {
    id: i64,
    author_id: i64,
    name: String,
    text: String,
    cooking_time: i64,
    image: String,
    is_favorited: bool,
    is_in_shopping_cart: bool,
}

#[derive(Debug, FromRow)]
struct TagRow {
    recipe_id: i64,
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, FromRow)]
struct IngredientRow {
    recipe_id: i64,
    id: i64,
    name: String,
    measurement_unit: String,
    amount: i64,
}

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn membership(table: &str, viewer_id: i64) -> SimpleExpr {
    Expr::cust_with_values(
        format!(
            r#"EXISTS (SELECT 1 FROM "{table}" WHERE "{table}"."user_id" = ? AND "{table}"."recipe_id" = "recipe"."id")"#
        ),
        [viewer_id],
    )
}

/// Recipe columns plus the viewer's favorite and cart flags. Anonymous
/// viewers get `false` for both.
fn select_recipes(viewer: Option<&Caller>) -> SelectStatement {
    let viewer_id = viewer.map(|c| c.id).unwrap_or_default();

    Select::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::AuthorId),
            (Recipe::Table, Recipe::Name),
            (Recipe::Table, Recipe::Text),
            (Recipe::Table, Recipe::CookingTime),
            (Recipe::Table, Recipe::Image),
        ])
        .expr_as(
            membership("favorite", viewer_id),
            Alias::new("is_favorited"),
        )
        .expr_as(
            membership("shopping_cart", viewer_id),
            Alias::new("is_in_shopping_cart"),
        )
        .from(Recipe::Table)
        .to_owned()
}

fn select_summaries() -> SelectStatement {
    Select::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::Name),
            (Recipe::Table, Recipe::Image),
            (Recipe::Table, Recipe::CookingTime),
        ])
        .from(Recipe::Table)
        .to_owned()
}

impl Query {
    pub async fn find(
        &self,
        viewer: Option<&Caller>,
        id: i64,
    ) -> foodgram_shared::Result<Option<RecipeView>> {
        let statement = select_recipes(viewer)
            .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(self.hydrate(viewer, rows).await?.pop())
    }

    pub async fn summary(&self, id: i64) -> foodgram_shared::Result<Option<RecipeSummary>> {
        let statement = select_summaries()
            .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeSummary, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Attaches tags, ingredients and author profiles to recipe rows,
    /// keeping the row order.
    async fn hydrate(
        &self,
        viewer: Option<&Caller>,
        rows: Vec<RecipeRow>,
    ) -> foodgram_shared::Result<Vec<RecipeView>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids = rows.iter().map(|r| r.id).collect::<Vec<_>>();

        let statement = Select::select()
            .column((RecipeTag::Table, RecipeTag::RecipeId))
            .columns([
                (TagTable::Table, TagTable::Id),
                (TagTable::Table, TagTable::Name),
                (TagTable::Table, TagTable::Slug),
            ])
            .from(RecipeTag::Table)
            .join(
                JoinType::InnerJoin,
                TagTable::Table,
                Expr::col((TagTable::Table, TagTable::Id))
                    .equals((RecipeTag::Table, RecipeTag::TagId)),
            )
            .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).is_in(ids.clone()))
            .order_by((TagTable::Table, TagTable::Name), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let tag_rows = sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.recipe_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
                slug: row.slug,
            });
        }

        let statement = Select::select()
            .columns([
                (RecipeIngredient::Table, RecipeIngredient::RecipeId),
                (RecipeIngredient::Table, RecipeIngredient::Amount),
            ])
            .columns([
                (Ingredient::Table, Ingredient::Id),
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .from(RecipeIngredient::Table)
            .join(
                JoinType::InnerJoin,
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId)).is_in(ids),
            )
            .order_by((RecipeIngredient::Table, RecipeIngredient::Id), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let ingredient_rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut ingredients: HashMap<i64, Vec<IngredientLine>> = HashMap::new();
        for row in ingredient_rows {
            ingredients
                .entry(row.recipe_id)
                .or_default()
                .push(IngredientLine {
                    id: row.id,
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    amount: row.amount,
                });
        }

        let mut author_ids = rows.iter().map(|r| r.author_id).collect::<Vec<_>>();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors = foodgram_user::Query(self.0.clone())
            .find_many(viewer, &author_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect::<HashMap<_, _>>();

        rows.into_iter()
            .map(|row| -> foodgram_shared::Result<RecipeView> {
                let author = authors.get(&row.author_id).cloned().ok_or_else(|| {
                    anyhow::anyhow!("author {} of recipe {} not found", row.author_id, row.id)
                })?;

                Ok(RecipeView {
                    id: row.id,
                    tags: tags.remove(&row.id).unwrap_or_default(),
                    author,
                    ingredients: ingredients.remove(&row.id).unwrap_or_default(),
                    is_favorited: row.is_favorited,
                    is_in_shopping_cart: row.is_in_shopping_cart,
                    name: row.name,
                    image: row.image,
                    text: row.text,
                    cooking_time: row.cooking_time,
                })
            })
            .collect()
    }
}
