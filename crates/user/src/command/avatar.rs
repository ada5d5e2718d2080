use foodgram_shared::{Caller, image};

use crate::repository::{self, UpdateInput};

const FOLDER: &str = "users";

impl super::Command {
    /// Stores a new avatar from a base64 data URI and returns its URL. The
    /// previous file, if any, is removed.
    pub async fn set_avatar(&self, caller: &Caller, data_uri: &str) -> foodgram_shared::Result<String> {
        let image = image::parse_data_uri("avatar", data_uri)?;
        let previous = repository::find_avatar(&self.read_db, caller.id).await?;
        let url = self.media.save(FOLDER, &image).await?;

        repository::update(
            &self.write_db,
            caller.id,
            UpdateInput {
                avatar: Some(Some(url.to_owned())),
                ..Default::default()
            },
        )
        .await?;

        if let Some(previous) = previous {
            self.media.remove(&previous).await?;
        }

        Ok(url)
    }

    pub async fn clear_avatar(&self, caller: &Caller) -> foodgram_shared::Result<()> {
        let Some(previous) = repository::find_avatar(&self.read_db, caller.id).await? else {
            return Ok(());
        };

        repository::update(
            &self.write_db,
            caller.id,
            UpdateInput {
                avatar: Some(None),
                ..Default::default()
            },
        )
        .await?;

        self.media.remove(&previous).await
    }
}
