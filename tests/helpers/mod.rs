//! Builds an app over a temporary database and drives it with `oneshot`.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use foodgram::{
    AppState,
    config::{AuthConfig, Config, DatabaseConfig, LoggingConfig, MediaConfig, ServerConfig},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub bytes: Vec<u8>,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            base_url: "http://localhost:8000".to_string(),
            allowed_hosts: vec!["localhost".to_string()],
        },
        database: DatabaseConfig {
            url: format!("sqlite:{}", dir.path().join("db.sqlite3").display()),
            max_connections: 4,
        },
        auth: AuthConfig {
            secret_key: "test_secret_key_minimum_32_characters_long".to_string(),
            token_lifetime_days: 1,
        },
        media: MediaConfig {
            root: dir.path().join("media").display().to_string(),
        },
        logging: LoggingConfig::default(),
    }
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let config = test_config(&dir);

    let pool = foodgram::create_pool(&config.database.url, 4).await?;
    foodgram::migrate::run(&pool).await?;

    let shared = foodgram::shared_state(&config, pool.clone(), pool);
    let state = AppState::new(config, shared);

    Ok(TestApp {
        router: foodgram::router(state.clone()),
        state,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "localhost");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
            bytes: bytes.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, token, None).await
    }

    /// Registers `name` and returns its id.
    pub async fn register(&self, name: &str) -> i64 {
        let res = self
            .post(
                "/api/users/",
                None,
                json!({
                    "email": format!("{name}@foodgram.localhost"),
                    "username": name,
                    "first_name": "John",
                    "last_name": "Doe",
                    "password": "my_password",
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.text);

        res.json()["id"].as_i64().unwrap()
    }

    pub async fn login(&self, name: &str) -> String {
        let res = self
            .post(
                "/api/auth/token/login/",
                None,
                json!({
                    "email": format!("{name}@foodgram.localhost"),
                    "password": "my_password",
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "{}", res.text);

        res.json()["auth_token"].as_str().unwrap().to_owned()
    }

    /// Registers and logs in `name`, returning `(id, token)`.
    pub async fn user(&self, name: &str) -> (i64, String) {
        let id = self.register(name).await;
        let token = self.login(name).await;

        (id, token)
    }

    pub async fn make_staff(&self, name: &str) {
        self.state
            .user_command
            .set_staff(&format!("{name}@foodgram.localhost"), true)
            .await
            .unwrap();
    }

    /// Tags breakfast, lunch, dinner (ids 1..=3) and ingredients flour,
    /// sugar, eggs, milk, tea leaves (ids 1..=5).
    pub async fn seed_catalog(&self) {
        for slug in ["breakfast", "lunch", "dinner"] {
            self.state
                .catalog
                .create_tag(foodgram_recipe::TagInput {
                    name: slug.to_owned(),
                    slug: slug.to_owned(),
                })
                .await
                .unwrap();
        }

        self.state
            .catalog
            .import_ingredients("flour,g\nsugar,g\neggs,pcs\nmilk,ml\ntea leaves,g\n".as_bytes())
            .await
            .unwrap();
    }

    pub async fn create_recipe(
        &self,
        token: &str,
        name: &str,
        tags: &[i64],
        ingredients: &[(i64, i64)],
    ) -> i64 {
        let res = self.post("/api/recipes/", Some(token), recipe_body(name, tags, ingredients)).await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.text);

        res.json()["id"].as_i64().unwrap()
    }
}

pub fn recipe_body(name: &str, tags: &[i64], ingredients: &[(i64, i64)]) -> Value {
    json!({
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({ "id": id, "amount": amount }))
            .collect::<Vec<_>>(),
        "tags": tags,
        "image": PNG,
        "name": name,
        "text": format!("How to make {name}"),
        "cooking_time": 5,
    })
}
