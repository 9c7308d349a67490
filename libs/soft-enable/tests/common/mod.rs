#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use sea_orm::ConnectionTrait;
use soft_enable::{DbConfig, EnableConn};

pub mod user {
    use sea_orm::entity::prelude::*;
    use soft_enable::SoftEnable;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, SoftEnable)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub enabled: Option<bool>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::post::Entity")]
        Posts,
        #[sea_orm(has_one = "super::address::Entity")]
        Address,
    }

    impl Related<super::post::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Posts.def()
        }
    }

    impl Related<super::address::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Address.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod post {
    use sea_orm::entity::prelude::*;
    use soft_enable::SoftEnable;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, SoftEnable)]
    #[sea_orm(table_name = "posts")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub user_id: i32,
        pub title: String,
        pub enabled: Option<bool>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::UserId",
            to = "super::user::Column::Id"
        )]
        User,
        #[sea_orm(has_many = "super::comment::Entity")]
        Comments,
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl Related<super::comment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Comments.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod comment {
    use sea_orm::entity::prelude::*;
    use soft_enable::SoftEnable;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, SoftEnable)]
    #[sea_orm(table_name = "comments")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub post_id: i32,
        pub body: String,
        pub enabled: Option<bool>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::post::Entity",
            from = "Column::PostId",
            to = "super::post::Column::Id"
        )]
        Post,
    }

    impl Related<super::post::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Post.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod address {
    use sea_orm::entity::prelude::*;
    use soft_enable::SoftEnable;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, SoftEnable)]
    #[sea_orm(table_name = "addresses")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub user_id: i32,
        pub city: String,
        pub enabled: Option<bool>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::UserId",
            to = "super::user::Column::Id"
        )]
        User,
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Entity whose flag lives in a differently named, non-nullable column.
pub mod group {
    use sea_orm::entity::prelude::*;
    use soft_enable::SoftEnable;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, SoftEnable)]
    #[sea_orm(table_name = "groups")]
    #[soft_enable(column = "is_active")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub is_active: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, enabled BOOLEAN)",
    "CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL REFERENCES users(id), title TEXT NOT NULL, enabled BOOLEAN)",
    "CREATE TABLE comments (id INTEGER PRIMARY KEY, post_id INTEGER NOT NULL REFERENCES posts(id), body TEXT NOT NULL, enabled BOOLEAN)",
    "CREATE TABLE addresses (id INTEGER PRIMARY KEY, user_id INTEGER NOT NULL UNIQUE REFERENCES users(id), city TEXT NOT NULL, enabled BOOLEAN)",
    "CREATE TABLE groups (id INTEGER PRIMARY KEY, name TEXT NOT NULL, is_active BOOLEAN NOT NULL)",
];

// users: 1 A on, 2 B off, 3 C on, 4 D null
// posts: 1 a1 (A, on), 2 a2 (A, off), 3 c1 (C, off), 4 b1 (B, on)
// comments: 1 (a1, on), 2 (a1, off), 3 (b1, on)
// addresses: 1 Oslo (A, on), 2 Rome (C, off)
// groups: 1 admins on, 2 legacy off
const SEED: &[&str] = &[
    "INSERT INTO users (id, name, enabled) VALUES (1, 'A', 1), (2, 'B', 0), (3, 'C', 1), (4, 'D', NULL)",
    "INSERT INTO posts (id, user_id, title, enabled) VALUES (1, 1, 'a1', 1), (2, 1, 'a2', 0), (3, 3, 'c1', 0), (4, 2, 'b1', 1)",
    "INSERT INTO comments (id, post_id, body, enabled) VALUES (1, 1, 'first', 1), (2, 1, 'second', 0), (3, 4, 'third', 1)",
    "INSERT INTO addresses (id, user_id, city, enabled) VALUES (1, 1, 'Oslo', 1), (2, 3, 'Rome', 0)",
    "INSERT INTO groups (id, name, is_active) VALUES (1, 'admins', 1), (2, 'legacy', 0)",
];

/// Single-connection in-memory database; every pooled connection would
/// otherwise see its own empty database.
pub fn memory_config() -> DbConfig {
    DbConfig {
        max_connections: Some(1),
        min_connections: Some(1),
        ..DbConfig::default()
    }
}

/// Connection with the schema created but no rows.
pub async fn empty_db() -> EnableConn {
    let db = EnableConn::connect(&memory_config())
        .await
        .expect("Failed to connect to database");
    for stmt in SCHEMA {
        db.conn()
            .execute_unprepared(stmt)
            .await
            .expect("Failed to create table");
    }
    db
}

/// Connection with the schema and the fixture rows above.
pub async fn seeded_db() -> EnableConn {
    let db = empty_db().await;
    for stmt in SEED {
        db.conn()
            .execute_unprepared(stmt)
            .await
            .expect("Failed to seed");
    }
    db
}

pub fn ids<M, F>(rows: &[M], id: F) -> Vec<i32>
where
    F: Fn(&M) -> i32,
{
    rows.iter().map(id).collect()
}
