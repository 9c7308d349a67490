// Proc-macro crate for the soft-enable SeaORM layer
//
//! # soft-enable-macros
//!
//! Procedural macros for the `soft-enable` crate.
//!
//! ## `#[derive(SoftEnable)]`
//!
//! Implements `EnableableEntity` for the `SeaORM` `Entity` generated next to the
//! annotated `Model`. The flag column defaults to `enabled`; override it with
//! `#[soft_enable(column = "...")]`.
//!
//! ### Example
//!
//! ```ignore
//! use sea_orm::entity::prelude::*;
//! use soft_enable::SoftEnable;
//!
//! #[derive(Clone, Debug, PartialEq, DeriveEntityModel, SoftEnable)]
//! #[sea_orm(table_name = "users")]
//! pub struct Model {
//!     #[sea_orm(primary_key)]
//!     pub id: i32,
//!     pub enabled: Option<bool>,
//!     pub email: String,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro_error2::proc_macro_error;
use syn::{DeriveInput, parse_macro_input};

mod soft_enable;

/// Derive macro for implementing `EnableableEntity`.
///
/// Place this on your `SeaORM` Model struct. The struct must have a field
/// holding the flag, named `enabled` unless overridden.
///
/// # Attributes
///
/// - `column = "column_name"` - flag column (optional, defaults to `enabled`)
///
/// # Example
///
/// ```ignore
/// #[derive(DeriveEntityModel, SoftEnable)]
/// #[sea_orm(table_name = "groups")]
/// #[soft_enable(column = "is_active")]
/// pub struct Model {
///     #[sea_orm(primary_key)]
///     pub id: i32,
///     pub is_active: bool,
///     pub name: String,
/// }
/// ```
#[proc_macro_derive(SoftEnable, attributes(soft_enable))]
#[proc_macro_error]
pub fn derive_soft_enable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    soft_enable::expand_derive_soft_enable(input).into()
}
