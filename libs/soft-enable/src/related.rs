//! Relation-existence and relation-count subqueries.
//!
//! Each helper builds a correlated subquery over the related entity `R`. The
//! subquery is itself an [`EnabledSelect<R>`], so it carries `R`'s default
//! enablement filter unless the closure overrides it, e.g.
//! `|q| q.with_disabled()`. Joins added in the closure narrow the subquery as
//! well. Inside a subquery the enabled column is always table-qualified.

use sea_orm::{
    Condition, Identity, QuerySelect, QueryTrait, Related, RelationDef,
    sea_query::{DynIden, Expr, SelectStatement, SimpleExpr, SubQueryStatement},
};

use crate::cond::ColumnQualification;
use crate::entity_traits::EnableableEntity;
use crate::error::{EnableError, Result};
use crate::select::{EnableSelectExt, EnabledSelect};

impl<E> EnabledSelect<E>
where
    E: EnableableEntity,
{
    /// Keep rows of `E` that have at least one related `R` matching `configure`.
    ///
    /// # Errors
    /// Returns `EnableError::Unsupported` for relations over composite keys or
    /// through a junction table.
    pub fn has_related<R, F>(self, configure: F) -> Result<Self>
    where
        R: EnableableEntity,
        E: Related<R>,
        F: FnOnce(EnabledSelect<R>) -> EnabledSelect<R>,
    {
        let sub = correlated::<E, R, F>(configure, Expr::value(1))?;
        Ok(self.filter(Expr::exists(sub)))
    }

    /// Shorthand for [`has_related`](Self::has_related) with `R`'s default filter.
    ///
    /// # Errors
    /// See [`has_related`](Self::has_related).
    pub fn has<R>(self) -> Result<Self>
    where
        R: EnableableEntity,
        E: Related<R>,
    {
        self.has_related::<R, _>(|q| q)
    }

    /// Keep rows of `E` that have no related `R` matching `configure`.
    ///
    /// # Errors
    /// See [`has_related`](Self::has_related).
    pub fn doesnt_have_related<R, F>(self, configure: F) -> Result<Self>
    where
        R: EnableableEntity,
        E: Related<R>,
        F: FnOnce(EnabledSelect<R>) -> EnabledSelect<R>,
    {
        let sub = correlated::<E, R, F>(configure, Expr::value(1))?;
        Ok(self.filter(Condition::all().not().add(Expr::exists(sub))))
    }

    /// Shorthand for [`doesnt_have_related`](Self::doesnt_have_related) with
    /// `R`'s default filter.
    ///
    /// # Errors
    /// See [`has_related`](Self::has_related).
    pub fn doesnt_have<R>(self) -> Result<Self>
    where
        R: EnableableEntity,
        E: Related<R>,
    {
        self.doesnt_have_related::<R, _>(|q| q)
    }

    /// OR the relation-existence test with the filters added so far.
    ///
    /// # Errors
    /// See [`has_related`](Self::has_related).
    pub fn or_has_related<R, F>(self, configure: F) -> Result<Self>
    where
        R: EnableableEntity,
        E: Related<R>,
        F: FnOnce(EnabledSelect<R>) -> EnabledSelect<R>,
    {
        let sub = correlated::<E, R, F>(configure, Expr::value(1))?;
        Ok(self.or_filter(Expr::exists(sub)))
    }

    /// Select the number of related `R` rows as an extra column named `alias`.
    ///
    /// The count respects `R`'s enablement filter. Read it back with
    /// [`into_model`](Self::into_model) and a `FromQueryResult` type that has
    /// a field of that name.
    ///
    /// # Errors
    /// See [`has_related`](Self::has_related).
    pub fn with_count_related<R, F>(mut self, alias: &str, configure: F) -> Result<Self>
    where
        R: EnableableEntity,
        E: Related<R>,
        F: FnOnce(EnabledSelect<R>) -> EnabledSelect<R>,
    {
        let sub = correlated::<E, R, F>(configure, Expr::cust("COUNT(*)"))?;
        let expr = SimpleExpr::SubQuery(
            None,
            Box::new(SubQueryStatement::SelectStatement(sub)),
        );
        self.inner = QuerySelect::column_as(self.inner, expr, alias);
        Ok(self)
    }

    /// [`with_count_related`](Self::with_count_related) with `R`'s default filter.
    ///
    /// # Errors
    /// See [`has_related`](Self::has_related).
    pub fn with_count<R>(self, alias: &str) -> Result<Self>
    where
        R: EnableableEntity,
        E: Related<R>,
    {
        self.with_count_related::<R, _>(alias, |q| q)
    }
}

/// `SELECT <projection> FROM r [joins] WHERE <inner filters> AND r.to = e.from`.
fn correlated<E, R, F>(configure: F, projection: SimpleExpr) -> Result<SelectStatement>
where
    E: EnableableEntity + Related<R>,
    R: EnableableEntity,
    F: FnOnce(EnabledSelect<R>) -> EnabledSelect<R>,
{
    if <E as Related<R>>::via().is_some() {
        return Err(EnableError::Unsupported(
            "relation subqueries through a junction table",
        ));
    }
    let rel: RelationDef = <E as Related<R>>::to();
    let from_col = unary(&rel.from_col)?;
    let to_col = unary(&rel.to_col)?;

    let inner = configure(R::find().enablement()).qualify(ColumnQualification::Always);
    tracing::trace!(
        outer = E::default().table_name(),
        related = R::default().table_name(),
        stages = ?inner.policy.stages(),
        "building relation subquery"
    );

    // Joins, filters and limits set by `configure` stay on the subquery;
    // only the projection is replaced.
    let mut sub = inner.into_select().into_query();
    sub.clear_selects()
        .expr(projection)
        .and_where(Expr::col((R::default(), to_col)).equals((E::default(), from_col)));
    Ok(sub)
}

fn unary(identity: &Identity) -> Result<DynIden> {
    match identity {
        Identity::Unary(col) => Ok(col.clone()),
        _ => Err(EnableError::Unsupported(
            "relation subqueries over composite keys",
        )),
    }
}
