use foodgram_db::table::{AuthToken, Subscribe, User};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password: String,
    pub is_staff: bool,
}

pub enum FindType {
    Id(i64),
    Email(String),
    Username(String),
}

pub(crate) fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> foodgram_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Email,
            User::Username,
            User::Password,
            User::IsStaff,
        ])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::cust_with_values(
            r#""email" = ? COLLATE NOCASE"#,
            [email],
        )),
        FindType::Username(username) => statement.and_where(Expr::cust_with_values(
            r#""username" = ? COLLATE NOCASE"#,
            [username],
        )),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub struct CreateInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub(crate) async fn create(pool: &SqlitePool, input: CreateInput) -> Result<i64, sqlx::Error> {
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::Password,
            User::IsStaff,
            User::CreatedAt,
        ])
        .values_panic([
            input.email.into(),
            input.username.into(),
            input.first_name.into(),
            input.last_name.into(),
            input.password.into(),
            false.into(),
            now().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let res = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(res.last_insert_rowid())
}

#[derive(Default)]
pub struct UpdateInput {
    pub password: Option<String>,
    pub avatar: Option<Option<String>>,
    pub is_staff: Option<bool>,
}

pub(crate) async fn update(
    pool: &SqlitePool,
    id: i64,
    input: UpdateInput,
) -> foodgram_shared::Result<()> {
    let mut statement = Query::update()
        .table(User::Table)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    if let Some(password) = input.password {
        statement.value(User::Password, password);
    }

    if let Some(avatar) = input.avatar {
        statement.value(User::Avatar, avatar);
    }

    if let Some(is_staff) = input.is_staff {
        statement.value(User::IsStaff, is_staff);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn find_avatar(
    pool: &SqlitePool,
    id: i64,
) -> foodgram_shared::Result<Option<String>> {
    let statement = Query::select()
        .column(User::Avatar)
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let avatar: Option<Option<String>> = sqlx::query_scalar_with(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(avatar.flatten())
}

pub(crate) async fn insert_token(
    pool: &SqlitePool,
    jti: &str,
    user_id: i64,
    expires_at: i64,
) -> foodgram_shared::Result<()> {
    let statement = Query::insert()
        .into_table(AuthToken::Table)
        .columns([
            AuthToken::Id,
            AuthToken::UserId,
            AuthToken::ExpiresAt,
            AuthToken::CreatedAt,
        ])
        .values_panic([
            jti.into(),
            user_id.into(),
            expires_at.into(),
            now().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Returns the owner of a live token.
pub(crate) async fn find_token_user(
    pool: &SqlitePool,
    jti: &str,
) -> foodgram_shared::Result<Option<i64>> {
    let statement = Query::select()
        .column(AuthToken::UserId)
        .from(AuthToken::Table)
        .and_where(Expr::col(AuthToken::Id).eq(jti))
        .and_where(Expr::col(AuthToken::ExpiresAt).gt(now()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn delete_token(pool: &SqlitePool, jti: &str) -> foodgram_shared::Result<()> {
    let statement = Query::delete()
        .from_table(AuthToken::Table)
        .and_where(Expr::col(AuthToken::Id).eq(jti))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn insert_subscribe(
    pool: &SqlitePool,
    user_id: i64,
    following_id: i64,
) -> Result<(), sqlx::Error> {
    let statement = Query::insert()
        .into_table(Subscribe::Table)
        .columns([
            Subscribe::UserId,
            Subscribe::FollowingId,
            Subscribe::CreatedAt,
        ])
        .values_panic([user_id.into(), following_id.into(), now().into()])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Returns how many rows were removed.
pub(crate) async fn delete_subscribe(
    pool: &SqlitePool,
    user_id: i64,
    following_id: i64,
) -> foodgram_shared::Result<u64> {
    let statement = Query::delete()
        .from_table(Subscribe::Table)
        .and_where(Expr::col(Subscribe::UserId).eq(user_id))
        .and_where(Expr::col(Subscribe::FollowingId).eq(following_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let res = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(res.rows_affected())
}
