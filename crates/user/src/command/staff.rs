use crate::repository::{self, FindType, UpdateInput};

impl super::Command {
    /// Grants or revokes the staff flag. Returns the user id.
    pub async fn set_staff(&self, email: &str, is_staff: bool) -> foodgram_shared::Result<i64> {
        let Some(user) = repository::find(&self.read_db, FindType::Email(email.to_owned())).await?
        else {
            foodgram_shared::not_found!("user {email} not found");
        };

        repository::update(
            &self.write_db,
            user.id,
            UpdateInput {
                is_staff: Some(is_staff),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!(user_id = user.id, is_staff, "staff flag updated");

        Ok(user.id)
    }
}
