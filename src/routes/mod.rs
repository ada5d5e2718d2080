use axum::{
    Router,
    http::Uri,
    routing::{get, post, put},
};
use foodgram_shared::Page;
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

use crate::config::Config;

mod auth;
mod health;
mod ingredients;
mod recipes;
mod short_link;
mod tags;
mod users;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_command: foodgram_user::Command,
    pub user_query: foodgram_user::Query,
    pub recipe_command: foodgram_recipe::Command,
    pub recipe_query: foodgram_recipe::Query,
    pub catalog: foodgram_recipe::Catalog,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: Config, state: foodgram_shared::State) -> Self {
        let tokens = foodgram_user::TokenSigner::new(
            &config.auth.secret_key,
            config.auth.token_lifetime_days,
        );

        Self {
            user_command: foodgram_user::Command::new(state.clone(), tokens),
            user_query: foodgram_user::Query(state.clone()),
            recipe_command: foodgram_recipe::Command(state.clone()),
            recipe_query: foodgram_recipe::Query(state.clone()),
            catalog: foodgram_recipe::Catalog(state.clone()),
            pool: state.read_db,
            config,
        }
    }
}

/// Page-number pagination envelope with absolute links to the neighbours.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

fn page_link(base_url: &str, uri: &Uri, page: u64) -> Option<String> {
    let mut url = url::Url::parse(base_url).ok()?.join(uri.path()).ok()?;
    let pairs = url::form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect::<Vec<_>>();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(pairs);
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }

    if url.query() == Some("") {
        url.set_query(None);
    }

    Some(url.into())
}

impl<T> Paginated<T> {
    pub fn new(config: &Config, uri: &Uri, page: Page<T>) -> Self {
        let base_url = config.server.base_url();

        Self {
            count: page.count,
            next: page
                .has_next()
                .then(|| page_link(base_url, uri, page.page + 1))
                .flatten(),
            previous: page
                .has_previous()
                .then(|| page_link(base_url, uri, page.page - 1))
                .flatten(),
            results: page.results,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let media = ServeDir::new(&app_state.config.media.root);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/auth/token/login/", post(auth::login))
        .route("/api/auth/token/logout/", post(auth::logout))
        .route("/api/users/", get(users::list).post(users::create))
        .route("/api/users/me/", get(users::me))
        .route(
            "/api/users/me/avatar/",
            put(users::set_avatar).delete(users::clear_avatar),
        )
        .route("/api/users/set_password/", post(users::set_password))
        .route("/api/users/subscriptions/", get(users::subscriptions))
        .route("/api/users/{id}/", get(users::detail))
        .route(
            "/api/users/{id}/subscribe/",
            post(users::subscribe).delete(users::unsubscribe),
        )
        .route("/api/tags/", get(tags::list))
        .route("/api/tags/{id}/", get(tags::detail))
        .route(
            "/api/ingredients/",
            get(ingredients::list).post(ingredients::create),
        )
        .route("/api/ingredients/{id}/", get(ingredients::detail))
        .route("/api/recipes/", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/download_shopping_cart/",
            get(recipes::download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}/",
            get(recipes::detail)
                .put(recipes::update)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route("/api/recipes/{id}/get-link/", get(recipes::get_link))
        .route(
            "/api/recipes/{id}/favorite/",
            post(recipes::add_favorite).delete(recipes::remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(recipes::add_to_cart).delete(recipes::remove_from_cart),
        )
        .route("/s/{code}/", get(short_link::redirect))
        .nest_service("/media", media)
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            crate::middleware::allowed_hosts,
        ))
        .with_state(app_state)
}
