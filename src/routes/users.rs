use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
};
use foodgram_recipe::AuthorView;
use foodgram_shared::{Error, PageArgs};
use foodgram_user::{Profile, RegisterInput, SetPasswordInput};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthUser, viewer},
    error::Result,
    extract::JsonBody,
    routes::{AppState, Paginated},
};

#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimit {
    pub recipes_limit: Option<u64>,
}

#[derive(Serialize)]
pub struct CreatedUser {
    email: String,
    id: i64,
    username: String,
    first_name: String,
    last_name: String,
}

#[derive(Deserialize)]
pub struct AvatarInput {
    avatar: String,
}

#[derive(Serialize)]
pub struct AvatarResponse {
    avatar: String,
}

fn user_not_found() -> Error {
    Error::NotFound("No User matches the given query.".to_owned())
}

pub async fn list(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(args): Query<PageArgs>,
    uri: Uri,
) -> Result<Json<Paginated<Profile>>> {
    let page = state.user_query.list(viewer(&user), &args).await?;

    Ok(Json(Paginated::new(&state.config, &uri, page)))
}

#[tracing::instrument(skip_all, fields(username = %input.username))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<CreatedUser>)> {
    let id = state.user_command.register(input).await?;
    let profile = state
        .user_query
        .find(None, id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            email: profile.email,
            id: profile.id,
            username: profile.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
        }),
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Profile>> {
    let profile = state
        .user_query
        .find(viewer(&user), id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(profile))
}

pub async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Json<Profile>> {
    let caller = user.caller();
    let profile = state
        .user_query
        .find(Some(caller), caller.id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(profile))
}

#[tracing::instrument(skip_all, fields(user_id = user.caller().id))]
pub async fn set_avatar(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<AvatarInput>,
) -> Result<Json<AvatarResponse>> {
    let avatar = state
        .user_command
        .set_avatar(user.caller(), &input.avatar)
        .await?;

    Ok(Json(AvatarResponse { avatar }))
}

#[tracing::instrument(skip_all, fields(user_id = user.caller().id))]
pub async fn clear_avatar(State(state): State<AppState>, user: AuthUser) -> Result<StatusCode> {
    state.user_command.clear_avatar(user.caller()).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip_all, fields(user_id = user.caller().id))]
pub async fn set_password(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<SetPasswordInput>,
) -> Result<StatusCode> {
    state.user_command.set_password(user.caller(), input).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn subscriptions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(args): Query<PageArgs>,
    Query(limit): Query<RecipesLimit>,
    uri: Uri,
) -> Result<Json<Paginated<AuthorView>>> {
    let page = state
        .recipe_query
        .subscriptions(user.caller(), &args, limit.recipes_limit)
        .await?;

    Ok(Json(Paginated::new(&state.config, &uri, page)))
}

#[tracing::instrument(skip(state, user, limit), fields(user_id = user.caller().id))]
pub async fn subscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Query(limit): Query<RecipesLimit>,
) -> Result<(StatusCode, Json<AuthorView>)> {
    let caller = user.caller();
    state.user_command.subscribe(caller, id).await?;

    let author = state
        .recipe_query
        .author(Some(caller), id, limit.recipes_limit)
        .await?
        .ok_or_else(user_not_found)?;

    Ok((StatusCode::CREATED, Json(author)))
}

#[tracing::instrument(skip(state, user), fields(user_id = user.caller().id))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.user_command.unsubscribe(user.caller(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}
