use foodgram_db::table::Recipe;
use foodgram_shared::{Caller, Page, PageArgs};
use foodgram_user::Profile;
use sea_query::{Expr, ExprTrait, Order, Query as Select, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;

use super::{RecipeSummary, select_summaries};

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    #[serde(flatten)]
    pub profile: Profile,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: u64,
}

impl super::Query {
    /// Authors the caller follows. `recipes_limit` caps the recipes listed
    /// per author, the count always covers all of them.
    pub async fn subscriptions(
        &self,
        caller: &Caller,
        args: &PageArgs,
        recipes_limit: Option<u64>,
    ) -> foodgram_shared::Result<Page<AuthorView>> {
        let profiles = foodgram_user::Query(self.0.clone())
            .following(caller, args)
            .await?;

        let mut views = Vec::with_capacity(profiles.results.len());
        for profile in profiles.results.iter().cloned() {
            views.push(self.author_view(profile, recipes_limit).await?);
        }

        Ok(Page {
            count: profiles.count,
            results: views,
            page: profiles.page,
            limit: profiles.limit,
        })
    }

    pub async fn author(
        &self,
        viewer: Option<&Caller>,
        id: i64,
        recipes_limit: Option<u64>,
    ) -> foodgram_shared::Result<Option<AuthorView>> {
        let Some(profile) = foodgram_user::Query(self.0.clone()).find(viewer, id).await? else {
            return Ok(None);
        };

        Ok(Some(self.author_view(profile, recipes_limit).await?))
    }

    async fn author_view(
        &self,
        profile: Profile,
        recipes_limit: Option<u64>,
    ) -> foodgram_shared::Result<AuthorView> {
        let mut statement = select_summaries()
            .and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(profile.id))
            .order_by((Recipe::Table, Recipe::Name), Order::Asc)
            .order_by((Recipe::Table, Recipe::Id), Order::Asc)
            .to_owned();

        if let Some(limit) = recipes_limit {
            statement.limit(limit);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let recipes = sqlx::query_as_with::<_, RecipeSummary, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let (sql, values) = Select::select()
            .expr(Expr::cust("COUNT(*)"))
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(profile.id))
            .build_sqlx(SqliteQueryBuilder);
        let count: i64 = sqlx::query_scalar_with(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        Ok(AuthorView {
            profile,
            recipes,
            recipes_count: count as u64,
        })
    }
}
