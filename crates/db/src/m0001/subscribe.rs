use sea_query::{Index, IndexCreateStatement, IndexDropStatement, SqliteQueryBuilder};

use crate::table::Subscribe;

// The self-follow CHECK is written by hand, the table builder has no portable
// way to compare two columns.
const CREATE_TABLE: &str = r#"CREATE TABLE "subscribe" (
    "id" integer NOT NULL PRIMARY KEY AUTOINCREMENT,
    "user_id" integer NOT NULL REFERENCES "user" ("id") ON DELETE CASCADE,
    "following_id" integer NOT NULL REFERENCES "user" ("id") ON DELETE CASCADE,
    "created_at" bigint NOT NULL,
    CONSTRAINT "ck_subscribe_not_self" CHECK ("user_id" <> "following_id")
)"#;

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_subscribe_user_following")
        .table(Subscribe::Table)
        .unique()
        .col(Subscribe::UserId)
        .col(Subscribe::FollowingId)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_subscribe_user_following")
        .table(Subscribe::Table)
        .to_owned()
}

operation!(
    CreateTable,
    CREATE_TABLE.to_owned(),
    r#"DROP TABLE "subscribe""#.to_owned(),
);

operation!(
    CreateUk1,
    create_uk_1().to_string(SqliteQueryBuilder),
    drop_uk_1().to_string(SqliteQueryBuilder),
);
