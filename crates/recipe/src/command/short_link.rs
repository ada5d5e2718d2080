use foodgram_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use ulid::Ulid;

const CODE_LEN: usize = 8;
const ATTEMPTS: usize = 5;

/// Random lowercase base32 code taken from the entropy half of a ULID.
fn generate_code() -> String {
    let ulid = Ulid::new().to_string().to_lowercase();

    ulid[ulid.len() - CODE_LEN..].to_owned()
}

impl super::Command {
    /// Returns the recipe's short code, assigning one on first use.
    pub async fn short_link(&self, id: i64) -> foodgram_shared::Result<String> {
        for _ in 0..ATTEMPTS {
            if let Some(code) = self.current_code(id).await? {
                return Ok(code);
            }

            let code = generate_code();
            let statement = Query::update()
                .table(Recipe::Table)
                .value(Recipe::ShortLink, code.to_owned())
                .and_where(Expr::col(Recipe::Id).eq(id))
                .and_where(Expr::col(Recipe::ShortLink).is_null())
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

            match sqlx::query_with(&sql, values).execute(&self.write_db).await {
                Ok(res) if res.rows_affected() == 1 => {
                    tracing::info!(recipe_id = id, code, "short link assigned");
                    return Ok(code);
                }
                // Another request assigned a code first, read it back.
                Ok(_) => continue,
                Err(e) if foodgram_shared::is_unique_violation(&e) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(anyhow::anyhow!("could not assign a short link to recipe {id}").into())
    }

    /// Fails with not-found for unknown recipes.
    async fn current_code(&self, id: i64) -> foodgram_shared::Result<Option<String>> {
        let statement = Query::select()
            .column(Recipe::ShortLink)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row: Option<Option<String>> = sqlx::query_scalar_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        match row {
            Some(code) => Ok(code),
            None => foodgram_shared::not_found!("recipe {id} not found"),
        }
    }
}
