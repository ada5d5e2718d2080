use foodgram_db::table::Recipe;
use foodgram_shared::{Caller, image};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use crate::{RecipeInput, repository};

impl super::Command {
    /// Creates a recipe authored by `caller` and returns its id.
    #[tracing::instrument(skip(self, input), fields(author_id = caller.id, name = %input.name))]
    pub async fn create(&self, caller: &Caller, input: RecipeInput) -> foodgram_shared::Result<i64> {
        input.validate()?;

        let Some(data_uri) = input.image.as_deref() else {
            foodgram_shared::bail!("image", "This field is required.");
        };
        let image = image::parse_data_uri("image", data_uri)?;

        input.check_references(&self.read_db).await?;

        let url = self.media.save(super::IMAGE_FOLDER, &image).await?;

        match self.insert(caller, &input, &url).await {
            Ok(id) => {
                tracing::info!(recipe_id = id, "recipe created");
                Ok(id)
            }
            Err(e) => {
                self.media.remove(&url).await?;
                Err(e)
            }
        }
    }

    async fn insert(
        &self,
        caller: &Caller,
        input: &RecipeInput,
        image_url: &str,
    ) -> foodgram_shared::Result<i64> {
        let mut tx = self.write_db.begin().await?;

        let statement = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Text,
                Recipe::CookingTime,
                Recipe::Image,
                Recipe::CreatedAt,
            ])
            .values_panic([
                caller.id.into(),
                input.name.to_owned().into(),
                input.text.to_owned().into(),
                input.cooking_time.into(),
                image_url.into(),
                crate::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        repository::insert_links(&mut tx, id, &input.tags, &input.ingredients).await?;

        tx.commit().await?;

        Ok(id)
    }
}
