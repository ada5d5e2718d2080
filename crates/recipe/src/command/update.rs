use foodgram_db::table::Recipe;
use foodgram_shared::{Caller, image, permission};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use crate::{RecipeInput, repository};

impl super::Command {
    /// Replaces a recipe. Tags and ingredients are swapped out as a whole,
    /// the image is only replaced when a new one is sent.
    #[tracing::instrument(skip(self, input), fields(caller_id = caller.id))]
    pub async fn update(
        &self,
        caller: &Caller,
        id: i64,
        input: RecipeInput,
    ) -> foodgram_shared::Result<()> {
        let current = repository::require(&self.read_db, id).await?;
        permission::owner_or_staff(caller, current.author_id)?;

        input.validate()?;
        let image = match input.image.as_deref() {
            Some(data_uri) => Some(image::parse_data_uri("image", data_uri)?),
            None => None,
        };
        input.check_references(&self.read_db).await?;

        let new_url = match &image {
            Some(image) => Some(self.media.save(super::IMAGE_FOLDER, image).await?),
            None => None,
        };

        if let Err(e) = self.replace(id, &input, new_url.as_deref()).await {
            if let Some(url) = &new_url {
                self.media.remove(url).await?;
            }

            return Err(e);
        }

        if new_url.is_some() {
            self.media.remove(&current.image).await?;
        }

        tracing::info!(recipe_id = id, "recipe updated");

        Ok(())
    }

    async fn replace(
        &self,
        id: i64,
        input: &RecipeInput,
        image_url: Option<&str>,
    ) -> foodgram_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        let mut statement = Query::update()
            .table(Recipe::Table)
            .value(Recipe::Name, input.name.to_owned())
            .value(Recipe::Text, input.text.to_owned())
            .value(Recipe::CookingTime, input.cooking_time)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        if let Some(url) = image_url {
            statement.value(Recipe::Image, url);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        repository::delete_links(&mut tx, id).await?;
        repository::insert_links(&mut tx, id, &input.tags, &input.ingredients).await?;

        tx.commit().await?;

        Ok(())
    }
}
