use foodgram_db::table::{Favorite, ShoppingCart};
use foodgram_shared::Caller;
use sea_query::{
    DeleteStatement, Expr, ExprTrait, InsertStatement, Query, SimpleExpr, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

/// Per-user recipe lists that are toggled from the recipe page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Favorite,
    ShoppingCart,
}

impl Relation {
    fn label(self) -> &'static str {
        match self {
            Relation::Favorite => "favorites",
            Relation::ShoppingCart => "shopping cart",
        }
    }

    fn insert(self, user_id: i64, recipe_id: i64) -> InsertStatement {
        let values: [SimpleExpr; 3] = [user_id.into(), recipe_id.into(), crate::now().into()];

        match self {
            Relation::Favorite => Query::insert()
                .into_table(Favorite::Table)
                .columns([Favorite::UserId, Favorite::RecipeId, Favorite::CreatedAt])
                .values_panic(values)
                .to_owned(),
            Relation::ShoppingCart => Query::insert()
                .into_table(ShoppingCart::Table)
                .columns([
                    ShoppingCart::UserId,
                    ShoppingCart::RecipeId,
                    ShoppingCart::CreatedAt,
                ])
                .values_panic(values)
                .to_owned(),
        }
    }

    fn delete(self, user_id: i64, recipe_id: i64) -> DeleteStatement {
        match self {
            Relation::Favorite => Query::delete()
                .from_table(Favorite::Table)
                .and_where(Expr::col(Favorite::UserId).eq(user_id))
                .and_where(Expr::col(Favorite::RecipeId).eq(recipe_id))
                .to_owned(),
            Relation::ShoppingCart => Query::delete()
                .from_table(ShoppingCart::Table)
                .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
                .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id))
                .to_owned(),
        }
    }
}

impl super::Command {
    /// Adds the recipe to one of the caller's lists. The unique index on
    /// the pair decides between concurrent adds.
    #[tracing::instrument(skip(self), fields(caller_id = caller.id))]
    pub async fn add(
        &self,
        caller: &Caller,
        relation: Relation,
        recipe_id: i64,
    ) -> foodgram_shared::Result<()> {
        repository::require(&self.read_db, recipe_id).await?;

        let (sql, values) = relation
            .insert(caller.id, recipe_id)
            .build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => Ok(()),
            Err(e) if foodgram_shared::is_unique_violation(&e) => {
                foodgram_shared::duplicate!("Recipe is already in {}.", relation.label())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip(self), fields(caller_id = caller.id))]
    pub async fn remove(
        &self,
        caller: &Caller,
        relation: Relation,
        recipe_id: i64,
    ) -> foodgram_shared::Result<()> {
        repository::require(&self.read_db, recipe_id).await?;

        let (sql, values) = relation
            .delete(caller.id, recipe_id)
            .build_sqlx(SqliteQueryBuilder);
        let res = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if res.rows_affected() == 0 {
            foodgram_shared::missing!("Recipe is not in {}.", relation.label());
        }

        Ok(())
    }
}
