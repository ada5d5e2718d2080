use foodgram_db::table::Ingredient as IngredientTable;
use foodgram_shared::{Caller, permission};
use sea_query::{Expr, ExprTrait, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub measurement_unit: String,
}

/// Lowercased copy of the name used for prefix search. SQLite only folds
/// ASCII case, so the folding happens here.
pub(crate) fn search_name(name: &str) -> String {
    name.to_lowercase()
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn select_ingredients() -> SelectStatement {
    Query::select()
        .columns([
            IngredientTable::Id,
            IngredientTable::Name,
            IngredientTable::MeasurementUnit,
        ])
        .from(IngredientTable::Table)
        .to_owned()
}

impl super::Catalog {
    /// All ingredients whose name starts with `prefix`, ignoring case.
    pub async fn ingredients(&self, prefix: Option<&str>) -> foodgram_shared::Result<Vec<Ingredient>> {
        let mut statement = select_ingredients()
            .order_by(IngredientTable::Name, Order::Asc)
            .to_owned();

        if let Some(prefix) = prefix.map(str::trim).filter(|p| !p.is_empty()) {
            statement.and_where(Expr::cust_with_values(
                r#""search_name" LIKE ? ESCAPE '\'"#,
                [format!("{}%", escape_like(&search_name(prefix)))],
            ));
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Ingredient, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn find_ingredient(&self, id: i64) -> foodgram_shared::Result<Option<Ingredient>> {
        let statement = select_ingredients()
            .and_where(Expr::col(IngredientTable::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Ingredient, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    pub async fn create_ingredient(
        &self,
        caller: &Caller,
        input: IngredientInput,
    ) -> foodgram_shared::Result<Ingredient> {
        permission::staff(caller)?;
        input.validate()?;

        let name = input.name.trim().to_owned();
        let measurement_unit = input.measurement_unit.trim().to_owned();

        let statement = Query::insert()
            .into_table(IngredientTable::Table)
            .columns([
                IngredientTable::Name,
                IngredientTable::MeasurementUnit,
                IngredientTable::SearchName,
            ])
            .values_panic([
                name.to_owned().into(),
                measurement_unit.to_owned().into(),
                search_name(&name).into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(res) => {
                tracing::info!(ingredient_id = res.last_insert_rowid(), "ingredient created");

                Ok(Ingredient {
                    id: res.last_insert_rowid(),
                    name,
                    measurement_unit,
                })
            }
            Err(e) if foodgram_shared::is_unique_violation(&e) => foodgram_shared::bail!(
                "name",
                "Ingredient \"{name}\" measured in \"{measurement_unit}\" already exists."
            ),
            Err(e) => Err(e.into()),
        }
    }
}
