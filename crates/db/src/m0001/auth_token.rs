use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    SqliteQueryBuilder, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{AuthToken, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(AuthToken::Table)
        .col(
            ColumnDef::new(AuthToken::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(AuthToken::UserId).integer().not_null())
        .col(ColumnDef::new(AuthToken::ExpiresAt).big_integer().not_null())
        .col(ColumnDef::new(AuthToken::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_auth_token_user")
                .from(AuthToken::Table, AuthToken::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(AuthToken::Table).to_owned()
}

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_auth_token_user_id")
        .table(AuthToken::Table)
        .col(AuthToken::UserId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_auth_token_user_id")
        .table(AuthToken::Table)
        .to_owned()
}

operation!(
    CreateTable,
    create_table().to_string(SqliteQueryBuilder),
    drop_table().to_string(SqliteQueryBuilder),
);

operation!(
    CreateIdx1,
    create_idx_1().to_string(SqliteQueryBuilder),
    drop_idx_1().to_string(SqliteQueryBuilder),
);
