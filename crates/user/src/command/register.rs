use serde::Deserialize;
use validator::Validate;

use crate::repository::{self, CreateInput, FindType};
use crate::validate::username as validate_username;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 150), custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl super::Command {
    /// Email and username are paired: each one may only ever belong to the
    /// account holding the other.
    #[tracing::instrument(skip_all, fields(email = %input.email, username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> foodgram_shared::Result<i64> {
        input.validate()?;

        let by_email =
            repository::find(&self.read_db, FindType::Email(input.email.to_owned())).await?;
        let by_username =
            repository::find(&self.read_db, FindType::Username(input.username.to_owned())).await?;

        match (by_email, by_username) {
            (Some(a), Some(b)) if a.id == b.id => {
                foodgram_shared::bail!("email", "A user with this email already exists.");
            }
            (Some(_), _) => {
                foodgram_shared::bail!(
                    "email",
                    "This email is already registered with a different username."
                );
            }
            (_, Some(_)) => {
                foodgram_shared::bail!(
                    "username",
                    "This username is already registered with a different email."
                );
            }
            (None, None) => {}
        }

        let password = crate::password::hash(&input.password)?;

        let id = repository::create(
            &self.write_db,
            CreateInput {
                email: input.email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                password,
            },
        )
        .await
        .map_err(|e| {
            if foodgram_shared::is_unique_violation(&e) {
                foodgram_shared::Error::field("email", "A user with this email already exists.")
            } else {
                e.into()
            }
        })?;

        tracing::info!(user_id = id, "user registered");

        Ok(id)
    }
}
