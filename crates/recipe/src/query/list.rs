use foodgram_db::table::{Favorite, Recipe, RecipeTag, ShoppingCart, Tag};
use foodgram_shared::{Caller, Page, PageArgs};
use sea_query::{
    Expr, ExprTrait, JoinType, Order, Query as Select, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;

use super::{RecipeRow, RecipeView, select_recipes};

#[derive(Debug, Default, Clone)]
pub struct RecipeFilter {
    pub author: Option<i64>,
    /// Tag slugs, a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

/// `1`/`true` and `0`/`false`, anything else is treated as absent.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn favorite_recipes(user_id: i64) -> SelectStatement {
    Select::select()
        .column(Favorite::RecipeId)
        .from(Favorite::Table)
        .and_where(Expr::col(Favorite::UserId).eq(user_id))
        .to_owned()
}

fn cart_recipes(user_id: i64) -> SelectStatement {
    Select::select()
        .column(ShoppingCart::RecipeId)
        .from(ShoppingCart::Table)
        .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
        .to_owned()
}

fn membership_filter(
    statement: &mut SelectStatement,
    flag: Option<bool>,
    subquery: SelectStatement,
) {
    let column = Expr::col((Recipe::Table, Recipe::Id));

    match flag {
        Some(true) => statement.and_where(column.in_subquery(subquery)),
        Some(false) => statement.and_where(column.not_in_subquery(subquery)),
        None => statement,
    };
}

/// Favorite and cart flags only narrow the list for authenticated viewers.
fn apply_filter(statement: &mut SelectStatement, filter: &RecipeFilter, viewer: Option<&Caller>) {
    if let Some(author) = filter.author {
        statement.and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author));
    }

    if !filter.tags.is_empty() {
        let tagged = Select::select()
            .column((RecipeTag::Table, RecipeTag::RecipeId))
            .from(RecipeTag::Table)
            .join(
                JoinType::InnerJoin,
                Tag::Table,
                Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
            )
            .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(filter.tags.clone()))
            .to_owned();

        statement.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(tagged));
    }

    if let Some(viewer) = viewer {
        membership_filter(
            statement,
            filter.is_favorited,
            favorite_recipes(viewer.id),
        );
        membership_filter(
            statement,
            filter.is_in_shopping_cart,
            cart_recipes(viewer.id),
        );
    }
}

impl super::Query {
    /// Recipes ordered by name.
    pub async fn list(
        &self,
        viewer: Option<&Caller>,
        filter: &RecipeFilter,
        args: &PageArgs,
    ) -> foodgram_shared::Result<Page<RecipeView>> {
        let mut statement = select_recipes(viewer);
        apply_filter(&mut statement, filter, viewer);
        statement
            .order_by((Recipe::Table, Recipe::Name), Order::Asc)
            .order_by((Recipe::Table, Recipe::Id), Order::Asc)
            .limit(args.limit())
            .offset(args.offset());

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut count = Select::select()
            .expr(Expr::cust("COUNT(*)"))
            .from(Recipe::Table)
            .to_owned();
        apply_filter(&mut count, filter, viewer);

        let (sql, values) = count.build_sqlx(SqliteQueryBuilder);
        let count: i64 = sqlx::query_scalar_with(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let results = self.hydrate(viewer, rows).await?;

        Ok(Page::new(args, count as u64, results))
    }
}
