use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use foodgram_shared::{Caller, Error};
use foodgram_user::Session;

use crate::{error::AppError, routes::AppState};

/// Token from an `Authorization: Token <key>` (or `Bearer <key>`) header.
fn token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let invalid = || Error::Unauthorized("Invalid token header.".to_owned());
    let value = value.to_str().map_err(|_| invalid())?;
    let (scheme, token) = value.trim().split_once(' ').ok_or_else(invalid)?;

    if !scheme.eq_ignore_ascii_case("token") && !scheme.eq_ignore_ascii_case("bearer") {
        return Ok(None);
    }

    let token = token.trim();
    if token.is_empty() || token.contains(' ') {
        return Err(invalid().into());
    }

    Ok(Some(token))
}

/// An authenticated caller, rejects the request with 401 otherwise.
pub struct AuthUser(pub Session);

impl AuthUser {
    pub fn caller(&self) -> &Caller {
        &self.0.caller
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = token(parts)? else {
            return Err(Error::Unauthorized(
                "Authentication credentials were not provided.".to_owned(),
            )
            .into());
        };

        let session = state.user_command.authenticate(token).await?;

        Ok(AuthUser(session))
    }
}

/// Authentication is optional: no header yields `None`, a bad token is
/// still rejected.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(token) = token(parts)? else {
            return Ok(None);
        };

        let session = state.user_command.authenticate(token).await?;

        Ok(Some(AuthUser(session)))
    }
}

/// Caller of a public endpoint, anonymous when no token was sent.
pub fn viewer(user: &Option<AuthUser>) -> Option<&Caller> {
    user.as_ref().map(AuthUser::caller)
}
