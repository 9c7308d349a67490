use sea_orm::{
    ConnectionTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Related, RelationDef, Select, SelectModel, Selector,
    sea_query::IntoCondition, Condition,
};

use crate::cond::{ColumnQualification, DisabledMode, EnablePolicy};
use crate::config::EnableOptions;
use crate::entity_traits::EnableableEntity;
use crate::error::Result;

/// A `SeaORM` `Select` with the soft-enable filter attached.
///
/// Built with the default stage in place, so executing it returns enabled
/// rows only. The extension methods push override stages that last for this
/// query value only; other queries for the same entity are unaffected.
///
/// User filters, the enablement predicate and any joins are kept apart and
/// combined when the query is executed, so the column form (bare or
/// table-qualified) reflects the final shape of the query.
///
/// # Example
/// ```rust,ignore
/// use soft_enable::EnableSelectExt;
///
/// // enabled users only
/// let users = user::Entity::find().enablement().all(conn).await?;
///
/// // every user, whatever the flag says
/// let all = user::Entity::find().enablement().with_disabled().all(conn).await?;
///
/// // disabled (`false`) users only
/// let off = user::Entity::find().enablement().only_disabled().all(conn).await?;
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct EnabledSelect<E: EnableableEntity> {
    pub(crate) inner: Select<E>,
    pub(crate) cond: Condition,
    pub(crate) policy: EnablePolicy,
    pub(crate) joined: bool,
    pub(crate) qualification: ColumnQualification,
}

/// Extension trait to put a regular `SeaORM` `Select` under the soft-enable filter.
pub trait EnableSelectExt<E: EnableableEntity>: Sized {
    /// Attach the default `enabled = true` filter.
    fn enablement(self) -> EnabledSelect<E>;
}

impl<E> EnableSelectExt<E> for Select<E>
where
    E: EnableableEntity,
{
    fn enablement(self) -> EnabledSelect<E> {
        EnabledSelect::new(self, &EnableOptions::default())
    }
}

impl<E> EnabledSelect<E>
where
    E: EnableableEntity,
{
    /// Wrap `select` with the default stage and the qualification from `options`.
    pub fn new(select: Select<E>, options: &EnableOptions) -> Self {
        Self {
            inner: select,
            cond: Condition::all(),
            policy: EnablePolicy::default(),
            joined: false,
            qualification: options.qualify,
        }
    }

    /// Current filter stages of this query.
    #[must_use]
    pub fn policy(&self) -> &EnablePolicy {
        &self.policy
    }

    /// Whether a join was added through this wrapper.
    #[must_use]
    pub fn is_joined(&self) -> bool {
        self.joined
    }

    /// Override how the enabled column is rendered.
    pub fn qualify(mut self, qualification: ColumnQualification) -> Self {
        self.qualification = qualification;
        self
    }

    // Query extensions

    /// Remove the enablement filter: enabled and disabled rows are returned.
    pub fn with_disabled(mut self) -> Self {
        self.policy.with_disabled();
        self
    }

    /// Remove the filter and require `enabled = true` explicitly.
    ///
    /// Same rows as the default; useful to restore the filter after
    /// [`with_disabled`](Self::with_disabled).
    pub fn without_disabled(mut self) -> Self {
        self.policy.without_disabled();
        self
    }

    /// Remove the filter and require `enabled = false`.
    ///
    /// Rows whose flag is `NULL` are not returned, even though
    /// [`EnableableModel::is_disabled`](crate::EnableableModel::is_disabled)
    /// reports them as disabled.
    pub fn only_disabled(mut self) -> Self {
        self.policy.only_disabled();
        self
    }

    /// Apply one of the extensions by mode.
    pub fn apply_mode(mut self, mode: DisabledMode) -> Self {
        self.policy.apply_mode(mode);
        self
    }

    /// Apply one of the extensions by name, e.g. `"with_disabled"` or `"onlyDisabled"`.
    ///
    /// # Errors
    /// Returns `EnableError::InvalidCall` if no extension has that name.
    pub fn apply_extension(self, name: &str) -> Result<Self> {
        let mode = name.parse::<DisabledMode>()?;
        Ok(self.apply_mode(mode))
    }

    // Chaining

    /// Add a filter; it is AND-ed with previous filters.
    pub fn filter<F: IntoCondition>(mut self, filter: F) -> Self {
        self.cond = self.cond.add(filter.into_condition());
        self
    }

    /// OR a filter with the filters added so far.
    ///
    /// The enablement predicate stays outside the OR group.
    pub fn or_filter<F: IntoCondition>(mut self, filter: F) -> Self {
        self.cond = if self.cond.is_empty() {
            Condition::all().add(filter.into_condition())
        } else {
            Condition::any().add(self.cond).add(filter.into_condition())
        };
        self
    }

    /// Add ordering to the query.
    pub fn order_by<C>(mut self, col: C, order: sea_orm::Order) -> Self
    where
        C: sea_orm::IntoSimpleExpr,
    {
        self.inner = QueryOrder::order_by(self.inner, col, order);
        self
    }

    /// Order ascending by `col`.
    pub fn order_by_asc<C>(self, col: C) -> Self
    where
        C: sea_orm::IntoSimpleExpr,
    {
        self.order_by(col, sea_orm::Order::Asc)
    }

    /// Order descending by `col`.
    pub fn order_by_desc<C>(self, col: C) -> Self
    where
        C: sea_orm::IntoSimpleExpr,
    {
        self.order_by(col, sea_orm::Order::Desc)
    }

    /// Add a limit to the query.
    pub fn limit(mut self, limit: u64) -> Self {
        self.inner = QuerySelect::limit(self.inner, limit);
        self
    }

    /// Add an offset to the query.
    pub fn offset(mut self, offset: u64) -> Self {
        self.inner = QuerySelect::offset(self.inner, offset);
        self
    }

    /// Join along a relation; from here on the enabled column is table-qualified.
    pub fn join(mut self, join: JoinType, rel: RelationDef) -> Self {
        self.inner = QuerySelect::join(self.inner, join, rel);
        self.joined = true;
        self
    }

    /// Inner join the related entity `R`.
    pub fn join_related<R>(self) -> Self
    where
        R: sea_orm::EntityTrait,
        E: Related<R>,
    {
        self.join(JoinType::InnerJoin, <E as Related<R>>::to())
    }

    /// Left join the related entity `R`.
    pub fn left_join_related<R>(self) -> Self
    where
        R: sea_orm::EntityTrait,
        E: Related<R>,
    {
        self.join(JoinType::LeftJoin, <E as Related<R>>::to())
    }

    // Execution

    /// The enablement predicate as it will be rendered for this query.
    #[must_use]
    pub fn enablement_condition(&self) -> Condition {
        let qualified = self.qualification.qualify(self.joined);
        self.policy.condition::<E>(qualified)
    }

    /// Unwrap into a plain `SeaORM` `Select` with filters and the enablement
    /// predicate applied.
    #[must_use]
    pub fn into_select(self) -> Select<E> {
        let enablement = self.enablement_condition();
        tracing::trace!(
            entity = E::default().table_name(),
            column = %E::enabled_column_name(),
            stages = ?self.policy.stages(),
            joined = self.joined,
            "rendering soft-enable filter"
        );

        let mut select = self.inner;
        if !self.cond.is_empty() {
            select = QueryFilter::filter(select, self.cond);
        }
        if !enablement.is_empty() {
            select = QueryFilter::filter(select, enablement);
        }
        select
    }

    /// Map results into a custom `FromQueryResult` type, e.g. one carrying a
    /// column added by [`with_count_related`](Self::with_count_related).
    #[must_use]
    pub fn into_model<M>(self) -> Selector<SelectModel<M>>
    where
        M: FromQueryResult,
    {
        self.into_select().into_model::<M>()
    }

    /// Execute the query and return all matching results.
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the database query fails.
    pub async fn all<C>(self, conn: &C) -> Result<Vec<E::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(self.into_select().all(conn).await?)
    }

    /// Execute the query and return at most one result.
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the database query fails.
    pub async fn one<C>(self, conn: &C) -> Result<Option<E::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(self.into_select().one(conn).await?)
    }

    /// Execute the query and return the number of matching results.
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the database query fails.
    pub async fn count<C>(self, conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
        E::Model: FromQueryResult + Send + Sync,
    {
        Ok(self.into_select().count(conn).await?)
    }

    /// Whether at least one row matches.
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the database query fails.
    pub async fn exists<C>(self, conn: &C) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        Ok(self.one(conn).await?.is_some())
    }
}
