use axum::{
    Json,
    extract::{Path, State},
    http::{
        StatusCode, Uri,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::IntoResponse,
};
use axum_extra::extract::Query;
use foodgram_recipe::{RecipeFilter, RecipeInput, RecipeSummary, RecipeView, Relation, parse_flag};
use foodgram_shared::{Caller, Error, PageArgs};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthUser, viewer},
    error::Result,
    extract::JsonBody,
    routes::{AppState, Paginated},
};

/// Query string of the recipe list. `tags` may be repeated.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub author: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

impl RecipeParams {
    fn filter(&self) -> RecipeFilter {
        let mut tags = self.tags.clone();
        tags.sort();
        tags.dedup();

        RecipeFilter {
            author: self.author,
            tags,
            is_favorited: self.is_favorited.as_deref().and_then(parse_flag),
            is_in_shopping_cart: self.is_in_shopping_cart.as_deref().and_then(parse_flag),
        }
    }

    fn page_args(&self) -> PageArgs {
        PageArgs {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Serialize)]
pub struct ShortLink {
    #[serde(rename = "short-link")]
    short_link: String,
}

fn recipe_not_found() -> Error {
    Error::NotFound("No Recipe matches the given query.".to_owned())
}

async fn view(state: &AppState, caller: Option<&Caller>, id: i64) -> Result<RecipeView> {
    Ok(state
        .recipe_query
        .find(caller, id)
        .await?
        .ok_or_else(recipe_not_found)?)
}

pub async fn list(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(params): Query<RecipeParams>,
    uri: Uri,
) -> Result<Json<Paginated<RecipeView>>> {
    let page = state
        .recipe_query
        .list(viewer(&user), &params.filter(), &params.page_args())
        .await?;

    Ok(Json(Paginated::new(&state.config, &uri, page)))
}

pub async fn detail(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeView>> {
    Ok(Json(view(&state, viewer(&user), id).await?))
}

#[tracing::instrument(skip_all, fields(user_id = user.caller().id))]
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<RecipeInput>,
) -> Result<(StatusCode, Json<RecipeView>)> {
    let caller = user.caller();
    let id = state.recipe_command.create(caller, input).await?;

    Ok((StatusCode::CREATED, Json(view(&state, Some(caller), id).await?)))
}

#[tracing::instrument(skip(state, user, input), fields(user_id = user.caller().id))]
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    JsonBody(input): JsonBody<RecipeInput>,
) -> Result<Json<RecipeView>> {
    let caller = user.caller();
    state.recipe_command.update(caller, id, input).await?;

    Ok(Json(view(&state, Some(caller), id).await?))
}

#[tracing::instrument(skip(state, user), fields(user_id = user.caller().id))]
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.recipe_command.delete(user.caller(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ShortLink>> {
    let code = state.recipe_command.short_link(id).await?;

    Ok(Json(ShortLink {
        short_link: format!("{}/s/{code}/", state.config.server.base_url()),
    }))
}

async fn add(
    state: &AppState,
    user: &AuthUser,
    relation: Relation,
    id: i64,
) -> Result<(StatusCode, Json<RecipeSummary>)> {
    state.recipe_command.add(user.caller(), relation, id).await?;
    let summary = state
        .recipe_query
        .summary(id)
        .await?
        .ok_or_else(recipe_not_found)?;

    Ok((StatusCode::CREATED, Json(summary)))
}

async fn remove(state: &AppState, user: &AuthUser, relation: Relation, id: i64) -> Result<StatusCode> {
    state.recipe_command.remove(user.caller(), relation, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeSummary>)> {
    add(&state, &user, Relation::Favorite, id).await
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    remove(&state, &user, Relation::Favorite, id).await
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeSummary>)> {
    add(&state, &user, Relation::ShoppingCart, id).await
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    remove(&state, &user, Relation::ShoppingCart, id).await
}

/// GET /api/recipes/download_shopping_cart/ - aggregated list as a text
/// attachment
#[tracing::instrument(skip_all, fields(user_id = user.caller().id))]
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse> {
    let list = state.recipe_query.shopping_list(user.caller()).await?;

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    foodgram_recipe::export::FILE_NAME
                ),
            ),
        ],
        list,
    ))
}
