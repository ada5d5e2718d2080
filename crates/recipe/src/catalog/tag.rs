use std::sync::LazyLock;

use foodgram_db::table::Tag as TagTable;
use regex::Regex;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;
use validator::Validate;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    #[validate(length(min = 1, max = 32), regex(path = *SLUG))]
    pub slug: String,
}

impl super::Catalog {
    pub async fn tags(&self) -> foodgram_shared::Result<Vec<Tag>> {
        let statement = Query::select()
            .columns([TagTable::Id, TagTable::Name, TagTable::Slug])
            .from(TagTable::Table)
            .order_by(TagTable::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Tag, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn find_tag(&self, id: i64) -> foodgram_shared::Result<Option<Tag>> {
        let statement = Query::select()
            .columns([TagTable::Id, TagTable::Name, TagTable::Slug])
            .from(TagTable::Table)
            .and_where(Expr::col(TagTable::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Tag, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Tags are only created by operators, hence no caller check here.
    pub async fn create_tag(&self, input: TagInput) -> foodgram_shared::Result<Tag> {
        input.validate()?;

        let statement = Query::insert()
            .into_table(TagTable::Table)
            .columns([TagTable::Name, TagTable::Slug])
            .values_panic([input.name.to_owned().into(), input.slug.to_owned().into()])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(res) => Ok(Tag {
                id: res.last_insert_rowid(),
                name: input.name,
                slug: input.slug,
            }),
            Err(e) if foodgram_shared::is_unique_violation(&e) => {
                foodgram_shared::bail!("slug", "Tag with slug \"{}\" already exists.", input.slug)
            }
            Err(e) => Err(e.into()),
        }
    }
}
