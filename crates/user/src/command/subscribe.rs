use foodgram_shared::Caller;

use crate::repository::{self, FindType};

impl super::Command {
    #[tracing::instrument(skip(self))]
    pub async fn subscribe(&self, caller: &Caller, following_id: i64) -> foodgram_shared::Result<()> {
        if repository::find(&self.read_db, FindType::Id(following_id))
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("user {following_id} not found");
        }

        if caller.id == following_id {
            foodgram_shared::bail!("errors", "You cannot subscribe to yourself.");
        }

        if let Err(e) = repository::insert_subscribe(&self.write_db, caller.id, following_id).await {
            if foodgram_shared::is_unique_violation(&e) {
                foodgram_shared::duplicate!("You are already subscribed to this user.");
            }

            return Err(e.into());
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn unsubscribe(
        &self,
        caller: &Caller,
        following_id: i64,
    ) -> foodgram_shared::Result<()> {
        if repository::find(&self.read_db, FindType::Id(following_id))
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("user {following_id} not found");
        }

        if repository::delete_subscribe(&self.write_db, caller.id, following_id).await? == 0 {
            foodgram_shared::missing!("You are not subscribed to this user.");
        }

        Ok(())
    }
}
