use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use foodgram_recipe::{Ingredient, IngredientInput};
use foodgram_shared::Error;
use serde::Deserialize;

use crate::{auth::AuthUser, error::Result, extract::JsonBody, routes::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct Search {
    pub name: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(search): Query<Search>,
) -> Result<Json<Vec<Ingredient>>> {
    Ok(Json(state.catalog.ingredients(search.name.as_deref()).await?))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ingredient>> {
    let ingredient = state
        .catalog
        .find_ingredient(id)
        .await?
        .ok_or_else(|| Error::NotFound("No Ingredient matches the given query.".to_owned()))?;

    Ok(Json(ingredient))
}

#[tracing::instrument(skip_all, fields(user_id = user.caller().id))]
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<IngredientInput>,
) -> Result<(StatusCode, Json<Ingredient>)> {
    let ingredient = state.catalog.create_ingredient(user.caller(), input).await?;

    Ok((StatusCode::CREATED, Json(ingredient)))
}
