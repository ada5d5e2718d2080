use std::{path::Path, str::FromStr};

use foodgram_recipe::{Catalog, IngredientAmount, RecipeInput, TagInput};
use foodgram_shared::{Caller, MediaStore, State};
use foodgram_user::{RegisterInput, TokenSigner};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub struct TestState {
    pub state: State,
    pub command: foodgram_recipe::Command,
    pub query: foodgram_recipe::Query,
    pub catalog: Catalog,
}

pub async fn setup_test_state(dir: &Path) -> anyhow::Result<TestState> {
    let path = dir.join("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    let state = State {
        read_db: pool.clone(),
        write_db: pool,
        media: MediaStore::new(dir.join("media"), "/media"),
    };

    Ok(TestState {
        command: foodgram_recipe::Command(state.clone()),
        query: foodgram_recipe::Query(state.clone()),
        catalog: Catalog(state.clone()),
        state,
    })
}

#[allow(dead_code)]
pub async fn create_user(state: &TestState, name: &str) -> anyhow::Result<Caller> {
    let command = foodgram_user::Command::new(
        state.state.clone(),
        TokenSigner::new("test-secret-key-with-enough-length", 1),
    );

    let id = command
        .register(RegisterInput {
            email: format!("{name}@foodgram.localhost"),
            username: name.to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(Caller {
        id,
        is_staff: false,
    })
}

/// Seeds tags `breakfast`, `lunch`, `dinner` (ids 1..=3).
#[allow(dead_code)]
pub async fn seed_tags(state: &TestState) -> anyhow::Result<()> {
    for slug in ["breakfast", "lunch", "dinner"] {
        state
            .catalog
            .create_tag(TagInput {
                name: slug.to_owned(),
                slug: slug.to_owned(),
            })
            .await?;
    }

    Ok(())
}

/// Seeds flour, sugar, eggs, milk and tea leaves (ids 1..=5).
#[allow(dead_code)]
pub async fn seed_ingredients(state: &TestState) -> anyhow::Result<()> {
    let csv = "flour,g\nsugar,g\neggs,pcs\nmilk,ml\ntea leaves,g\n";
    state.catalog.import_ingredients(csv.as_bytes()).await?;

    Ok(())
}

#[allow(dead_code)]
pub fn recipe_input(name: &str, tags: Vec<i64>, ingredients: Vec<(i64, i64)>) -> RecipeInput {
    RecipeInput {
        ingredients: ingredients
            .into_iter()
            .map(|(id, amount)| IngredientAmount { id, amount })
            .collect(),
        tags,
        image: Some(PNG.to_owned()),
        name: name.to_owned(),
        text: format!("How to cook {name}."),
        cooking_time: 10,
    }
}

#[allow(dead_code)]
pub async fn count(state: &TestState, table: &str) -> anyhow::Result<i64> {
    Ok(
        sqlx::query_scalar(&format!(r#"SELECT COUNT(*) FROM "{table}""#))
            .fetch_one(&state.state.read_db)
            .await?,
    )
}
