//! Enable and disable single records.
//!
//! Both operations fire the entity's pre-phase hooks, write only the flag
//! column, refresh the caller's model from the stored row and then fire the
//! post-phase hooks. A pre-phase abort returns `Ok(false)` without touching
//! the database.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, IntoActiveModel,
    ModelTrait,
};

use crate::entity_traits::EnableableEntity;
use crate::error::Result;
use crate::hooks::{HookEvent, HookOutcome, HookRegistry};

/// Set the record's flag to `true` and persist it.
///
/// Returns `Ok(false)` if an `enabling` hook aborted, `Ok(true)` otherwise.
///
/// # Errors
/// Returns `EnableError::Db` if the update fails; `enabled` hooks do not run then.
pub async fn enable<E, M, C>(hooks: &HookRegistry, conn: &C, model: &mut M) -> Result<bool>
where
    E: EnableableEntity<Model = M>,
    M: ModelTrait<Entity = E> + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    C: ConnectionTrait,
{
    toggle::<E, M, C>(hooks, conn, model, true).await
}

/// Set the record's flag to `false` and persist it.
///
/// Returns `Ok(false)` if a `disabling` hook aborted, `Ok(true)` otherwise.
///
/// # Errors
/// Returns `EnableError::Db` if the update fails; `disabled` hooks do not run then.
pub async fn disable<E, M, C>(hooks: &HookRegistry, conn: &C, model: &mut M) -> Result<bool>
where
    E: EnableableEntity<Model = M>,
    M: ModelTrait<Entity = E> + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    C: ConnectionTrait,
{
    toggle::<E, M, C>(hooks, conn, model, false).await
}

async fn toggle<E, M, C>(hooks: &HookRegistry, conn: &C, model: &mut M, value: bool) -> Result<bool>
where
    E: EnableableEntity<Model = M>,
    M: ModelTrait<Entity = E> + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    C: ConnectionTrait,
{
    let (before, after) = if value {
        (HookEvent::Enabling, HookEvent::Enabled)
    } else {
        (HookEvent::Disabling, HookEvent::Disabled)
    };

    if hooks.fire::<E>(before, model) == HookOutcome::Abort {
        return Ok(false);
    }

    let mut active = model.clone().into_active_model();
    active.set(E::enabled_col(), value.into());
    *model = active.update(conn).await?;

    tracing::debug!(
        entity = E::default().table_name(),
        enabled = value,
        "soft-enable record updated"
    );

    hooks.notify::<E>(after, model);
    Ok(true)
}
