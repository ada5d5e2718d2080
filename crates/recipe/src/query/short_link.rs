use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query as Select, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Query {
    /// Recipe id behind a short code.
    pub async fn resolve_short_link(&self, code: &str) -> foodgram_shared::Result<i64> {
        let statement = Select::select()
            .column(Recipe::Id)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::ShortLink).eq(code))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id: Option<i64> = sqlx::query_scalar_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        match id {
            Some(id) => Ok(id),
            None => foodgram_shared::not_found!("short link {code} not found"),
        }
    }
}
