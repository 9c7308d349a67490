//! # Soft Enable Walkthrough
//!
//! ## 1. Marking an entity
//!
//! An entity becomes enableable by implementing
//! [`EnableableEntity`](crate::EnableableEntity), usually through the derive:
//!
//! ```rust,ignore
//! use sea_orm::entity::prelude::*;
//! use soft_enable::SoftEnable;
//!
//! #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, SoftEnable)]
//! #[sea_orm(table_name = "users")]
//! pub struct Model {
//!     #[sea_orm(primary_key)]
//!     pub id: i32,
//!     pub enabled: Option<bool>,
//!     pub name: String,
//! }
//! ```
//!
//! The column defaults to `enabled`. Another field can carry the flag:
//!
//! ```rust,ignore
//! #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, SoftEnable)]
//! #[sea_orm(table_name = "groups")]
//! #[soft_enable(column = "is_active")]
//! pub struct Model {
//!     #[sea_orm(primary_key)]
//!     pub id: i32,
//!     pub is_active: Option<bool>,
//! }
//! ```
//!
//! The flag may be `bool` or `Option<bool>`. A `NULL` flag counts as disabled
//! for [`is_disabled`](crate::EnableableModel::is_disabled) but is matched by
//! neither the default filter nor `only_disabled`.
//!
//! ## 2. Querying
//!
//! ```rust,ignore
//! use soft_enable::EnableSelectExt;
//!
//! // enabled rows
//! user::Entity::find().enablement().all(conn).await?;
//!
//! // all rows, then only disabled ones
//! user::Entity::find().enablement().with_disabled().all(conn).await?;
//! user::Entity::find().enablement().only_disabled().all(conn).await?;
//!
//! // pick the mode from a request parameter
//! let mode: DisabledMode = params.visibility.parse()?;
//! user::Entity::find().enablement().apply_mode(mode).all(conn).await?;
//! ```
//!
//! Mode names parse in either spelling:
//!
//! ```rust
//! use soft_enable::DisabledMode;
//!
//! assert_eq!("only_disabled".parse::<DisabledMode>().ok(), Some(DisabledMode::Only));
//! assert_eq!("withDisabled".parse::<DisabledMode>().ok(), Some(DisabledMode::With));
//! assert!("withTrashed".parse::<DisabledMode>().is_err());
//! ```
//!
//! `or_filter` groups the user filters; the enablement predicate stays
//! outside the group, so an OR never lets disabled rows through:
//!
//! ```rust,ignore
//! // WHERE (name = 'A' OR name = 'B') AND enabled = true
//! user::Entity::find()
//!     .enablement()
//!     .filter(user::Column::Name.eq("A"))
//!     .or_filter(user::Column::Name.eq("B"))
//!     .all(conn)
//!     .await?;
//! ```
//!
//! Once the query joins other tables the column is qualified
//! (`users.enabled`). Set `query.qualify: always` to qualify every query.
//!
//! ## 3. Relations
//!
//! Related rows come back filtered with the related entity's own predicate:
//!
//! ```rust,ignore
//! let posts = db.find_related::<_, post::Entity>(&user).all(db.conn()).await?;
//! let all_posts = db
//!     .find_related::<_, post::Entity>(&user)
//!     .with_disabled()
//!     .all(db.conn())
//!     .await?;
//! ```
//!
//! Existence and count subqueries accept a closure over the related query:
//!
//! ```rust,ignore
//! // users with at least one enabled post
//! db.find::<user::Entity>().has::<post::Entity>()?;
//!
//! // users with a post, disabled ones included, titled "draft"
//! db.find::<user::Entity>().has_related::<post::Entity, _>(|q| {
//!     q.with_disabled().filter(post::Column::Title.eq("draft"))
//! })?;
//!
//! // users plus their number of enabled posts
//! #[derive(FromQueryResult)]
//! struct UserWithPosts { id: i32, name: String, posts_count: i64 }
//!
//! db.find::<user::Entity>()
//!     .with_count::<post::Entity>("posts_count")?
//!     .into_model::<UserWithPosts>()
//!     .all(db.conn())
//!     .await?;
//! ```
//!
//! ## 4. Toggling
//!
//! ```rust,ignore
//! // one record, with hooks
//! db.disable(&mut user).await?;
//! assert!(user.is_disabled());
//!
//! // every matching row, without hooks
//! let rows = db
//!     .find::<user::Entity>()
//!     .filter(user::Column::Name.starts_with("test-"))
//!     .disable(db.conn())
//!     .await?;
//! ```
//!
//! ## 5. Hooks
//!
//! ```rust,ignore
//! // veto: returning false (or HookOutcome::Abort) cancels the write
//! db.hooks().disabling::<user::Entity, _, _>(|u| u.name != "admin");
//!
//! // observe
//! db.hooks().enabled::<user::Entity, _, _>(|u| tracing::info!(id = u.id, "user enabled"));
//!
//! // drop all hooks of an entity
//! db.hooks().flush::<user::Entity>();
//! ```
//!
//! ## 6. Configuration
//!
//! See [`config`](crate::config) for the YAML layout and the
//! `SOFT_ENABLE_` environment overrides.
