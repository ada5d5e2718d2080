use foodgram_shared::{Caller, Error};
use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

use crate::repository::{self, FindType};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// An authenticated request: who is calling and with which token.
#[derive(Debug, Clone)]
pub struct Session {
    pub caller: Caller,
    pub token_id: String,
}

fn invalid_credentials() -> Error {
    Error::field(
        "non_field_errors",
        "Unable to log in with provided credentials.",
    )
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> foodgram_shared::Result<String> {
        input.validate()?;

        let Some(user) = repository::find(&self.read_db, FindType::Email(input.email)).await?
        else {
            return Err(invalid_credentials());
        };

        if !crate::password::verify(&input.password, &user.password)? {
            return Err(invalid_credentials());
        }

        let jti = Ulid::new().to_string();
        let now = repository::now();
        let (token, exp) = self.tokens.sign(user.id, &jti, now.max(0) as u64)?;
        repository::insert_token(&self.write_db, &jti, user.id, exp as i64).await?;

        tracing::info!(user_id = user.id, "user logged in");

        Ok(token)
    }

    /// Resolves a token into a session. Revoked, expired or forged tokens
    /// and tokens of deleted users yield an authentication error. The staff
    /// flag is read fresh from the database.
    pub async fn authenticate(&self, token: &str) -> foodgram_shared::Result<Session> {
        let invalid = || Error::Unauthorized("Invalid token.".to_owned());

        let claims = self.tokens.verify(token).ok_or_else(invalid)?;
        let user_id = repository::find_token_user(&self.read_db, &claims.jti)
            .await?
            .ok_or_else(invalid)?;

        if claims.sub != user_id.to_string() {
            return Err(invalid());
        }

        let user = repository::find(&self.read_db, FindType::Id(user_id))
            .await?
            .ok_or_else(invalid)?;

        Ok(Session {
            caller: Caller {
                id: user.id,
                is_staff: user.is_staff,
            },
            token_id: claims.jti,
        })
    }

    pub async fn logout(&self, session: &Session) -> foodgram_shared::Result<()> {
        repository::delete_token(&self.write_db, &session.token_id).await?;

        tracing::info!(user_id = session.caller.id, "user logged out");

        Ok(())
    }
}
