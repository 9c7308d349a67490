use sea_orm::{
    ConnectionTrait, Iterable, PrimaryKeyToColumn, QueryFilter, QuerySelect, QueryTrait,
    sea_query::{Alias, Expr, Query, SimpleExpr},
};

use crate::entity_traits::EnableableEntity;
use crate::error::Result;
use crate::select::EnabledSelect;

impl<E> EnabledSelect<E>
where
    E: EnableableEntity,
{
    /// Set the flag to `true` on every row the query matches, disabled rows included.
    ///
    /// Filters added with [`filter`](Self::filter) and explicit
    /// `without_disabled`/`only_disabled` stages still apply; only the default
    /// predicate is dropped. Hooks are not fired for bulk updates.
    ///
    /// The update is narrowed to the primary keys the full query selects, so
    /// joins and conditions carried by the wrapped `Select` (e.g. the one
    /// built by `find_by_id`) limit it too.
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the update fails.
    ///
    /// # Example
    /// ```rust,ignore
    /// let rows = user::Entity::find()
    ///     .enablement()
    ///     .filter(user::Column::Name.eq("A"))
    ///     .enable(conn)
    ///     .await?;
    /// ```
    pub async fn enable<C>(self, conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        self.set_enabled(conn, true).await
    }

    /// Set the flag to `false` on every row the query matches.
    ///
    /// # Errors
    /// See [`enable`](Self::enable).
    pub async fn disable<C>(self, conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        self.set_enabled(conn, false).await
    }

    async fn set_enabled<C>(self, conn: &C, value: bool) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let keys: Vec<E::Column> = E::PrimaryKey::iter()
            .map(PrimaryKeyToColumn::into_column)
            .collect();

        // UPDATE carries neither joins nor the wrapped select's own WHERE, so
        // narrow by primary key. The derived table keeps MySQL from rejecting
        // a subquery over the table being updated.
        let ids = self
            .with_disabled()
            .into_select()
            .select_only()
            .columns(keys.iter().copied())
            .into_query();
        let ids = Query::select()
            .columns(keys.iter().copied())
            .from_subquery(ids, Alias::new("soft_enable_ids"))
            .to_owned();

        let target = match keys.as_slice() {
            [key] => Expr::col((E::default(), *key)),
            _ => Expr::tuple(
                keys.iter()
                    .map(|key| SimpleExpr::from(Expr::col((E::default(), *key)))),
            ),
        };

        let result = E::update_many()
            .col_expr(E::enabled_col(), Expr::value(value))
            .filter(target.in_subquery(ids))
            .exec(conn)
            .await?;
        tracing::debug!(
            entity = E::default().table_name(),
            enabled = value,
            rows = result.rows_affected,
            "bulk soft-enable update"
        );
        Ok(result.rows_affected)
    }
}
