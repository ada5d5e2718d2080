use foodgram_db::table::{Ingredient, RecipeIngredient, ShoppingCart};
use foodgram_shared::Caller;
use sea_query::{Expr, ExprTrait, JoinType, Order, Query as Select, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::export::{self, CartLine};

#[derive(FromRow)]
struct CartRow {
    name: String,
    measurement_unit: String,
    amount: i64,
}

impl super::Query {
    /// Every ingredient of every recipe in the caller's cart, in the order
    /// the recipes were added.
    pub async fn cart_lines(&self, caller: &Caller) -> foodgram_shared::Result<Vec<CartLine>> {
        let statement = Select::select()
            .columns([
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .column((RecipeIngredient::Table, RecipeIngredient::Amount))
            .from(ShoppingCart::Table)
            .join(
                JoinType::InnerJoin,
                RecipeIngredient::Table,
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .equals((ShoppingCart::Table, ShoppingCart::RecipeId)),
            )
            .join(
                JoinType::InnerJoin,
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(caller.id))
            .order_by((ShoppingCart::Table, ShoppingCart::Id), Order::Asc)
            .order_by((RecipeIngredient::Table, RecipeIngredient::Id), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, CartRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CartLine {
                name: row.name,
                measurement_unit: row.measurement_unit,
                amount: row.amount,
            })
            .collect())
    }

    /// Plain-text shopping list for the caller's cart.
    pub async fn shopping_list(&self, caller: &Caller) -> foodgram_shared::Result<String> {
        let lines = export::aggregate(self.cart_lines(caller).await?);

        Ok(export::render(&lines))
    }
}
