use axum::{
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
};

use crate::{error::Result, routes::AppState};

/// GET /s/{code}/ - 302 to the recipe the code was issued for
pub async fn redirect(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse> {
    let id = state.recipe_query.resolve_short_link(&code).await?;

    Ok((StatusCode::FOUND, [(LOCATION, format!("/api/recipes/{id}/"))]))
}
