use axum::{
    Json,
    extract::{Path, State},
};
use foodgram_recipe::Tag;
use foodgram_shared::Error;

use crate::{error::Result, routes::AppState};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tag>>> {
    Ok(Json(state.catalog.tags().await?))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Tag>> {
    let tag = state
        .catalog
        .find_tag(id)
        .await?
        .ok_or_else(|| Error::NotFound("No Tag matches the given query.".to_owned()))?;

    Ok(Json(tag))
}
