use std::{path::Path, str::FromStr};

use foodgram_shared::{Caller, MediaStore, State};
use foodgram_user::{RegisterInput, TokenSigner};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub const SECRET: &str = "test-secret-key-with-enough-length";

pub async fn setup_test_state(dir: &Path) -> anyhow::Result<State> {
    let path = dir.join("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(State {
        read_db: pool.clone(),
        write_db: pool,
        media: MediaStore::new(dir.join("media"), "/media"),
    })
}

pub fn command(state: &State) -> foodgram_user::Command {
    foodgram_user::Command::new(state.clone(), TokenSigner::new(SECRET, 1))
}

#[allow(dead_code)]
pub fn register_input(name: &str) -> RegisterInput {
    RegisterInput {
        email: format!("{name}@foodgram.localhost"),
        username: name.to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        password: "my_password".to_owned(),
    }
}

#[allow(dead_code)]
pub async fn create_user(state: &State, name: &str) -> anyhow::Result<Caller> {
    let id = command(state).register(register_input(name)).await?;

    Ok(Caller {
        id,
        is_staff: false,
    })
}
