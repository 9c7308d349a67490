#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Soft enable/disable for `SeaORM` entities.
//!
//! Entities opt in by naming a boolean "enabled" column. From then on every
//! query built through this crate returns only rows whose flag is `true`,
//! until the query asks otherwise:
//!
//! - [`EnabledSelect::with_disabled`]: every row
//! - [`EnabledSelect::without_disabled`]: enabled rows (explicitly)
//! - [`EnabledSelect::only_disabled`]: rows whose flag is `false`
//!
//! Overrides apply to a single query value. Single records are toggled with
//! [`EnableConn::enable`]/[`EnableConn::disable`], which run the entity's
//! lifecycle hooks; queries are toggled in bulk with
//! [`EnabledSelect::enable`]/[`EnabledSelect::disable`].
//!
//! # Features
//! - `sqlite` (default), `pg`, `mysql`: enable the matching `SeaORM` backend
//!
//! # Example
//! ```rust,ignore
//! use soft_enable::{EnableConn, EnableSelectExt, SoftEnable};
//!
//! #[derive(Clone, Debug, PartialEq, DeriveEntityModel, SoftEnable)]
//! #[sea_orm(table_name = "users")]
//! pub struct Model {
//!     #[sea_orm(primary_key)]
//!     pub id: i32,
//!     pub enabled: Option<bool>,
//!     pub name: String,
//! }
//!
//! let db = EnableConn::new(conn);
//! let visible = db.find::<user::Entity>().all(db.conn()).await?;
//! let everyone = db.find::<user::Entity>().with_disabled().all(db.conn()).await?;
//! ```
//!
//! See [`docs`] for a longer walkthrough.

// Lets the derive's `::soft_enable` paths resolve inside this crate too.
extern crate self as soft_enable;

pub mod config;
pub mod docs;
pub mod hooks;
pub mod record;

mod cond;
mod conn;
mod entity_traits;
mod error;
mod related;
mod select;
mod update;

pub use cond::{ColumnQualification, DisabledMode, EnablePolicy, FilterStage, enabled_expr};
pub use config::{DbConfig, EnableOptions, SoftEnableConfig};
pub use conn::EnableConn;
pub use entity_traits::{EnableableEntity, EnableableModel};
pub use error::{EnableError, Result};
pub use hooks::{HookEvent, HookOutcome, HookRegistry};
pub use select::{EnableSelectExt, EnabledSelect};

pub use soft_enable_macros::SoftEnable;
