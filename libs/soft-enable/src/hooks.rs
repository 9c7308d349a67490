//! Lifecycle hooks around record enable/disable.
//!
//! Hooks are registered per entity type and run synchronously, in
//! registration order. The pre-phase hooks (`enabling`, `disabling`) can veto
//! the operation by returning [`HookOutcome::Abort`] (or `false`); the first
//! abort stops the chain and nothing is written. Post-phase hooks (`enabled`,
//! `disabled`) run after a successful write and their outcome is ignored.
//!
//! ```rust,ignore
//! let hooks = HookRegistry::new();
//! hooks.disabling::<user::Entity, _, _>(|user| user.email != "root@example.com");
//! hooks.disabled::<user::Entity, _, _>(|user| tracing::info!(id = user.id, "user disabled"));
//! ```

use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

use dashmap::DashMap;
use sea_orm::EntityTrait;

/// Named lifecycle points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    Enabling,
    Enabled,
    Disabling,
    Disabled,
}

impl HookEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabling => "enabling",
            Self::Enabled => "enabled",
            Self::Disabling => "disabling",
            Self::Disabled => "disabled",
        }
    }

    /// Pre-phase events can abort the operation.
    #[must_use]
    pub fn is_pre(self) -> bool {
        matches!(self, Self::Enabling | Self::Disabling)
    }

    fn index(self) -> usize {
        match self {
            Self::Enabling => 0,
            Self::Enabled => 1,
            Self::Disabling => 2,
            Self::Disabled => 3,
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a hook callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookOutcome {
    #[default]
    Proceed,
    Abort,
}

impl From<()> for HookOutcome {
    fn from((): ()) -> Self {
        Self::Proceed
    }
}

impl From<bool> for HookOutcome {
    fn from(proceed: bool) -> Self {
        if proceed { Self::Proceed } else { Self::Abort }
    }
}

type Callback<E> = Arc<dyn Fn(&<E as EntityTrait>::Model) -> HookOutcome + Send + Sync>;

struct EntityHooks<E: EntityTrait> {
    slots: [Vec<Callback<E>>; 4],
}

impl<E: EntityTrait> EntityHooks<E> {
    fn new() -> Self {
        Self {
            slots: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
        }
    }
}

/// Per-entity registry of lifecycle callbacks.
///
/// Cheap to share behind an `Arc`; registration and dispatch may happen from
/// different tasks. Callbacks are cloned out of the registry before they run,
/// so a callback may itself register further hooks.
#[derive(Default)]
pub struct HookRegistry {
    entries: DashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("entities", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run before a record of `E` is enabled.
    pub fn enabling<E, F, R>(&self, callback: F)
    where
        E: EntityTrait,
        F: Fn(&E::Model) -> R + Send + Sync + 'static,
        R: Into<HookOutcome>,
    {
        self.register::<E, F, R>(HookEvent::Enabling, callback);
    }

    /// Register a callback run after a record of `E` was enabled.
    pub fn enabled<E, F, R>(&self, callback: F)
    where
        E: EntityTrait,
        F: Fn(&E::Model) -> R + Send + Sync + 'static,
        R: Into<HookOutcome>,
    {
        self.register::<E, F, R>(HookEvent::Enabled, callback);
    }

    /// Register a callback run before a record of `E` is disabled.
    pub fn disabling<E, F, R>(&self, callback: F)
    where
        E: EntityTrait,
        F: Fn(&E::Model) -> R + Send + Sync + 'static,
        R: Into<HookOutcome>,
    {
        self.register::<E, F, R>(HookEvent::Disabling, callback);
    }

    /// Register a callback run after a record of `E` was disabled.
    pub fn disabled<E, F, R>(&self, callback: F)
    where
        E: EntityTrait,
        F: Fn(&E::Model) -> R + Send + Sync + 'static,
        R: Into<HookOutcome>,
    {
        self.register::<E, F, R>(HookEvent::Disabled, callback);
    }

    /// Register a callback for an arbitrary event.
    pub fn register<E, F, R>(&self, event: HookEvent, callback: F)
    where
        E: EntityTrait,
        F: Fn(&E::Model) -> R + Send + Sync + 'static,
        R: Into<HookOutcome>,
    {
        let callback: Callback<E> = Arc::new(move |model| callback(model).into());
        let mut entry = self
            .entries
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(EntityHooks::<E>::new()));
        if let Some(hooks) = entry.value_mut().downcast_mut::<EntityHooks<E>>() {
            hooks.slots[event.index()].push(callback);
        }
        tracing::trace!(
            entity = E::default().table_name(),
            event = event.as_str(),
            "registered soft-enable hook"
        );
    }

    /// Drop every callback registered for `E`.
    pub fn flush<E: EntityTrait>(&self) {
        self.entries.remove(&TypeId::of::<E>());
    }

    /// Number of callbacks registered for `E` at `event`.
    #[must_use]
    pub fn len<E: EntityTrait>(&self, event: HookEvent) -> usize {
        self.entries
            .get(&TypeId::of::<E>())
            .and_then(|entry| {
                entry
                    .value()
                    .downcast_ref::<EntityHooks<E>>()
                    .map(|hooks| hooks.slots[event.index()].len())
            })
            .unwrap_or(0)
    }

    /// `true` when no entity has any callback registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the callbacks of `event` for `model` in registration order.
    ///
    /// For pre-phase events the first [`HookOutcome::Abort`] stops the chain
    /// and is returned. Post-phase events always return `Proceed`.
    #[must_use]
    pub fn fire<E: EntityTrait>(&self, event: HookEvent, model: &E::Model) -> HookOutcome {
        for callback in self.callbacks::<E>(event) {
            if callback(model) == HookOutcome::Abort && event.is_pre() {
                tracing::debug!(
                    entity = E::default().table_name(),
                    event = event.as_str(),
                    "soft-enable hook aborted the operation"
                );
                return HookOutcome::Abort;
            }
        }
        HookOutcome::Proceed
    }

    /// Run the callbacks of a post-phase event; their outcomes are ignored.
    pub fn notify<E: EntityTrait>(&self, event: HookEvent, model: &E::Model) {
        for callback in self.callbacks::<E>(event) {
            callback(model);
        }
    }

    fn callbacks<E: EntityTrait>(&self, event: HookEvent) -> Vec<Callback<E>> {
        self.entries
            .get(&TypeId::of::<E>())
            .and_then(|entry| {
                entry
                    .value()
                    .downcast_ref::<EntityHooks<E>>()
                    .map(|hooks| hooks.slots[event.index()].clone())
            })
            .unwrap_or_default()
    }
}
