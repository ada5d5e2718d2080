use foodgram_shared::Caller;
use serde::Deserialize;
use validator::Validate;

use crate::repository::{self, FindType, UpdateInput};

#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordInput {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

impl super::Command {
    pub async fn set_password(
        &self,
        caller: &Caller,
        input: SetPasswordInput,
    ) -> foodgram_shared::Result<()> {
        input.validate()?;

        let Some(user) = repository::find(&self.read_db, FindType::Id(caller.id)).await? else {
            foodgram_shared::not_found!("user {} not found", caller.id);
        };

        if !crate::password::verify(&input.current_password, &user.password)? {
            foodgram_shared::bail!("current_password", "Invalid password.");
        }

        let password = crate::password::hash(&input.new_password)?;
        repository::update(
            &self.write_db,
            caller.id,
            UpdateInput {
                password: Some(password),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!(user_id = caller.id, "password changed");

        Ok(())
    }
}
