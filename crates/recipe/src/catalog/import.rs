use std::io::Read;

use foodgram_db::table::Ingredient as IngredientTable;
use sea_query::{OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::ingredient::search_name;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: u64,
    /// Rows already present, or with an empty name or unit.
    pub skipped: u64,
}

impl super::Catalog {
    /// Loads `name,measurement_unit` rows. Rows clashing with an existing
    /// ingredient are skipped, the whole file goes in one transaction.
    pub async fn import_ingredients(&self, reader: impl Read) -> foodgram_shared::Result<ImportReport> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut report = ImportReport::default();
        let mut tx = self.write_db.begin().await?;

        for record in csv.records() {
            let record = record.map_err(anyhow::Error::from)?;
            let (Some(name), Some(unit)) = (record.get(0), record.get(1)) else {
                report.skipped += 1;
                continue;
            };

            if name.is_empty() || unit.is_empty() {
                report.skipped += 1;
                continue;
            }

            let statement = Query::insert()
                .into_table(IngredientTable::Table)
                .columns([
                    IngredientTable::Name,
                    IngredientTable::MeasurementUnit,
                    IngredientTable::SearchName,
                ])
                .values_panic([name.into(), unit.into(), search_name(name).into()])
                .on_conflict(
                    OnConflict::columns([IngredientTable::Name, IngredientTable::MeasurementUnit])
                        .do_nothing()
                        .to_owned(),
                )
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            let res = sqlx::query_with(&sql, values).execute(&mut *tx).await?;

            if res.rows_affected() == 0 {
                report.skipped += 1;
            } else {
                report.inserted += 1;
            }
        }

        tx.commit().await?;

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "ingredients imported"
        );

        Ok(report)
    }
}
