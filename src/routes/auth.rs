use axum::{Json, extract::State, http::StatusCode};
use foodgram_user::LoginInput;
use serde::Serialize;

use crate::{auth::AuthUser, error::Result, extract::JsonBody, routes::AppState};

#[derive(Serialize)]
pub struct TokenResponse {
    auth_token: String,
}

#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<Json<TokenResponse>> {
    let auth_token = state.user_command.login(input).await?;

    Ok(Json(TokenResponse { auth_token }))
}

#[tracing::instrument(skip_all, fields(user_id = user.caller().id))]
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> Result<StatusCode> {
    state.user_command.logout(&user.0).await?;

    Ok(StatusCode::NO_CONTENT)
}
