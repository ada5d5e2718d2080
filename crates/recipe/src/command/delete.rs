use foodgram_db::table::Recipe;
use foodgram_shared::{Caller, permission};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    #[tracing::instrument(skip(self), fields(caller_id = caller.id))]
    pub async fn delete(&self, caller: &Caller, id: i64) -> foodgram_shared::Result<()> {
        let current = repository::require(&self.read_db, id).await?;
        permission::owner_or_staff(caller, current.author_id)?;

        let statement = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        self.media.remove(&current.image).await?;

        tracing::info!(recipe_id = id, "recipe deleted");

        Ok(())
    }
}
