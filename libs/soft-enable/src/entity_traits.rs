use sea_orm::{EntityTrait, IdenStatic, ModelTrait, Value};

/// Defines the contract for entities whose rows can be soft enabled and disabled.
///
/// The entity names the boolean (or nullable boolean) column that carries the
/// flag. Every query built through this crate for such an entity excludes rows
/// whose flag is not `true` until the query opts out.
///
/// # Example (Manual Implementation)
/// ```rust,ignore
/// impl EnableableEntity for user::Entity {
///     fn enabled_col() -> Self::Column {
///         user::Column::Enabled
///     }
/// }
/// ```
///
/// # Example (Using Derive Macro)
/// ```rust,ignore
/// use soft_enable::SoftEnable;
///
/// #[derive(Clone, Debug, PartialEq, DeriveEntityModel, SoftEnable)]
/// #[sea_orm(table_name = "groups")]
/// #[soft_enable(column = "is_active")]
/// pub struct Model {
///     #[sea_orm(primary_key)]
///     pub id: i32,
///     pub is_active: Option<bool>,
///     pub name: String,
/// }
/// ```
pub trait EnableableEntity: EntityTrait {
    /// Returns the column that stores the enabled flag.
    ///
    /// The derive macro returns `Column::Enabled` unless
    /// `#[soft_enable(column = "...")]` names another field.
    fn enabled_col() -> Self::Column;

    /// Bare name of the enabled column, e.g. `enabled`.
    #[must_use]
    fn enabled_column_name() -> String {
        Self::enabled_col().as_str().to_owned()
    }

    /// Table-qualified name of the enabled column, e.g. `users.enabled`.
    ///
    /// Needed once a query joins other tables that carry a column of the same name.
    #[must_use]
    fn qualified_enabled_column() -> String {
        format!(
            "{}.{}",
            Self::default().table_name(),
            Self::enabled_col().as_str()
        )
    }
}

/// Record-side view of the enabled flag.
///
/// Implemented for every `SeaORM` model whose entity is [`EnableableEntity`].
pub trait EnableableModel: ModelTrait {
    /// Raw flag: `Some(true)`, `Some(false)`, or `None` for `NULL`.
    fn enabled_state(&self) -> Option<bool>;

    /// `true` iff the flag is exactly `true`.
    fn is_enabled(&self) -> bool {
        self.enabled_state() == Some(true)
    }

    /// `true` iff the flag is `NULL` or exactly `false`.
    ///
    /// Note that [`only_disabled`](crate::EnabledSelect::only_disabled) matches
    /// `false` rows only, so a `NULL` row is disabled here but not returned there.
    fn is_disabled(&self) -> bool {
        matches!(self.enabled_state(), None | Some(false))
    }
}

impl<M> EnableableModel for M
where
    M: ModelTrait,
    M::Entity: EnableableEntity,
{
    fn enabled_state(&self) -> Option<bool> {
        flag_from_value(&self.get(<M::Entity as EnableableEntity>::enabled_col()))
    }
}

/// Reads a flag out of a column value. Integer-backed columns count as set when non-zero.
fn flag_from_value(value: &Value) -> Option<bool> {
    match *value {
        Value::Bool(b) => b,
        Value::TinyInt(n) => n.map(|n| n != 0),
        Value::SmallInt(n) => n.map(|n| n != 0),
        Value::Int(n) => n.map(|n| n != 0),
        Value::BigInt(n) => n.map(|n| n != 0),
        Value::TinyUnsigned(n) => n.map(|n| n != 0),
        Value::SmallUnsigned(n) => n.map(|n| n != 0),
        Value::Unsigned(n) => n.map(|n| n != 0),
        Value::BigUnsigned(n) => n.map(|n| n != 0),
        _ => None,
    }
}
