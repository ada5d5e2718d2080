use std::ops::Deref;

use foodgram_db::table::{Subscribe, User};
use foodgram_shared::{Caller, Page, PageArgs};
use sea_query::{Alias, Expr, ExprTrait, JoinType, Order, Query as Select, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

/// Public view of a user. `is_subscribed` is relative to whoever is asking.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    pub is_subscribed: bool,
}

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn select_profiles(viewer: Option<&Caller>) -> SelectStatement {
    // Ids start at 1, so an anonymous viewer never matches a subscription.
    let viewer_id = viewer.map(|c| c.id).unwrap_or_default();

    Select::select()
        .columns([
            (User::Table, User::Id),
            (User::Table, User::Email),
            (User::Table, User::Username),
            (User::Table, User::FirstName),
            (User::Table, User::LastName),
            (User::Table, User::Avatar),
        ])
        .expr_as(
            Expr::cust_with_values(
                r#"EXISTS (SELECT 1 FROM "subscribe" WHERE "subscribe"."user_id" = ? AND "subscribe"."following_id" = "user"."id")"#,
                [viewer_id],
            ),
            Alias::new("is_subscribed"),
        )
        .from(User::Table)
        .to_owned()
}

impl Query {
    pub async fn find(
        &self,
        viewer: Option<&Caller>,
        id: i64,
    ) -> foodgram_shared::Result<Option<Profile>> {
        let statement = select_profiles(viewer)
            .and_where(Expr::col((User::Table, User::Id)).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Profile, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Profiles for a set of ids, in no particular order.
    pub async fn find_many(
        &self,
        viewer: Option<&Caller>,
        ids: &[i64],
    ) -> foodgram_shared::Result<Vec<Profile>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = select_profiles(viewer)
            .and_where(Expr::col((User::Table, User::Id)).is_in(ids.iter().copied()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Profile, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn list(
        &self,
        viewer: Option<&Caller>,
        args: &PageArgs,
    ) -> foodgram_shared::Result<Page<Profile>> {
        let statement = select_profiles(viewer)
            .order_by((User::Table, User::Id), Order::Asc)
            .limit(args.limit())
            .offset(args.offset())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let results = sqlx::query_as_with::<_, Profile, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let (sql, values) = Select::select()
            .expr(Expr::cust("COUNT(*)"))
            .from(User::Table)
            .build_sqlx(SqliteQueryBuilder);
        let count: i64 = sqlx::query_scalar_with(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        Ok(Page::new(args, count as u64, results))
    }

    /// Users the caller follows, oldest subscription first.
    pub async fn following(
        &self,
        caller: &Caller,
        args: &PageArgs,
    ) -> foodgram_shared::Result<Page<Profile>> {
        let statement = select_profiles(Some(caller))
            .join(
                JoinType::InnerJoin,
                Subscribe::Table,
                Expr::col((Subscribe::Table, Subscribe::FollowingId))
                    .equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((Subscribe::Table, Subscribe::UserId)).eq(caller.id))
            .order_by((Subscribe::Table, Subscribe::Id), Order::Asc)
            .limit(args.limit())
            .offset(args.offset())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let results = sqlx::query_as_with::<_, Profile, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let (sql, values) = Select::select()
            .expr(Expr::cust("COUNT(*)"))
            .from(Subscribe::Table)
            .and_where(Expr::col(Subscribe::UserId).eq(caller.id))
            .build_sqlx(SqliteQueryBuilder);
        let count: i64 = sqlx::query_scalar_with(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        Ok(Page::new(args, count as u64, results))
    }
}
