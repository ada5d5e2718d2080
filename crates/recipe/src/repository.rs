use foodgram_db::table::{Recipe, RecipeIngredient, RecipeTag};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};

use crate::IngredientAmount;

#[derive(Debug, FromRow)]
pub struct OwnerRow {
    pub author_id: i64,
    pub image: String,
}

pub(crate) async fn find_owner(
    pool: &SqlitePool,
    id: i64,
) -> foodgram_shared::Result<Option<OwnerRow>> {
    let statement = Query::select()
        .columns([Recipe::AuthorId, Recipe::Image])
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, OwnerRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

/// Fails with not-found when the recipe does not exist.
pub(crate) async fn require(pool: &SqlitePool, id: i64) -> foodgram_shared::Result<OwnerRow> {
    match find_owner(pool, id).await? {
        Some(row) => Ok(row),
        None => foodgram_shared::not_found!("recipe {id} not found"),
    }
}

pub(crate) async fn insert_links(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    tags: &[i64],
    ingredients: &[IngredientAmount],
) -> foodgram_shared::Result<()> {
    let mut statement = Query::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();

    for tag_id in tags {
        statement.values_panic([recipe_id.into(), (*tag_id).into()]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut statement = Query::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Amount,
        ])
        .to_owned();

    for ingredient in ingredients {
        statement.values_panic([
            recipe_id.into(),
            ingredient.id.into(),
            ingredient.amount.into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) async fn delete_links(
    conn: &mut SqliteConnection,
    recipe_id: i64,
) -> foodgram_shared::Result<()> {
    let statement = Query::delete()
        .from_table(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let statement = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}
