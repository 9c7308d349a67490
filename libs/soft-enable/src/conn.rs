//! Connection wrapper that builds enablement-filtered queries.
//!
//! `EnableConn` owns a `SeaORM` `DatabaseConnection`, the query options and the
//! hook registry. Queries started from it carry the default filter, and
//! record toggles run through the shared hooks.
//!
//! # Example
//!
//! ```ignore
//! use soft_enable::{EnableConn, SoftEnableConfig};
//!
//! let config = SoftEnableConfig::load(Some(Path::new("soft-enable.yaml")))?;
//! let db = EnableConn::from_config(&config).await?;
//!
//! db.hooks().disabling::<user::Entity, _, _>(|u| u.email != "root@example.com");
//!
//! let mut user = db
//!     .find_by_id::<user::Entity, _>(42)
//!     .one(db.conn())
//!     .await?
//!     .ok_or(NotFound)?;
//! db.disable(&mut user).await?;
//!
//! // gone from default queries, still visible when asked for
//! assert!(db.find_by_id::<user::Entity, _>(42).one(db.conn()).await?.is_none());
//! assert!(db
//!     .find_by_id::<user::Entity, _>(42)
//!     .only_disabled()
//!     .one(db.conn())
//!     .await?
//!     .is_some());
//! ```

use std::sync::Arc;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Database, DatabaseConnection,
    IntoActiveModel, ModelTrait, PrimaryKeyTrait, Related,
};

use crate::config::{DbConfig, EnableOptions, SoftEnableConfig};
use crate::entity_traits::EnableableEntity;
use crate::error::Result;
use crate::hooks::HookRegistry;
use crate::record;
use crate::select::EnabledSelect;

/// Database connection plus enablement settings.
///
/// Cloning is cheap; clones share the pool and the hook registry.
#[derive(Clone, Debug)]
pub struct EnableConn {
    conn: DatabaseConnection,
    hooks: Arc<HookRegistry>,
    options: EnableOptions,
}

impl EnableConn {
    /// Wrap a connection with default options and an empty hook registry.
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            hooks: Arc::new(HookRegistry::new()),
            options: EnableOptions::default(),
        }
    }

    /// Replace the query options used by [`find`](Self::find) and friends.
    #[must_use]
    pub fn with_options(mut self, options: EnableOptions) -> Self {
        self.options = options;
        self
    }

    /// Share an existing hook registry instead of the wrapper's own.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<HookRegistry>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Open a connection pool from database settings.
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the connection cannot be established.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let conn = Database::connect(config.connect_options()).await?;
        let db = Self::new(conn);
        tracing::info!(engine = db.db_engine(), "soft-enable connection ready");
        Ok(db)
    }

    /// Open a connection pool and apply the query options from `config`.
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the connection cannot be established.
    pub async fn from_config(config: &SoftEnableConfig) -> Result<Self> {
        Ok(Self::connect(&config.database).await?.with_options(config.query))
    }

    /// The underlying connection; queries executed on it directly are not filtered.
    #[must_use]
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Hook registry consulted by record [`enable`](Self::enable)/[`disable`](Self::disable).
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Query options applied to selects built by this wrapper.
    #[must_use]
    pub fn options(&self) -> &EnableOptions {
        &self.options
    }

    /// Return database engine identifier for tracing / logging.
    #[must_use]
    pub fn db_engine(&self) -> &'static str {
        use sea_orm::{ConnectionTrait, DatabaseBackend};

        match self.conn.get_database_backend() {
            DatabaseBackend::Postgres => "postgres",
            DatabaseBackend::MySql => "mysql",
            DatabaseBackend::Sqlite => "sqlite",
        }
    }

    /// Start a filtered select for `E`.
    pub fn find<E>(&self) -> EnabledSelect<E>
    where
        E: EnableableEntity,
    {
        EnabledSelect::new(E::find(), &self.options)
    }

    /// Filtered select for one row of `E` by primary key.
    ///
    /// A disabled row is not found unless the query opts out of the filter.
    pub fn find_by_id<E, T>(&self, id: T) -> EnabledSelect<E>
    where
        E: EnableableEntity,
        T: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        EnabledSelect::new(E::find_by_id(id), &self.options)
    }

    /// Filtered select for the `R` rows related to `model`.
    ///
    /// Works for has-one, has-many and belongs-to relations. Disabled related
    /// rows are left out by default; the parent's own flag is not consulted.
    pub fn find_related<M, R>(&self, model: &M) -> EnabledSelect<R>
    where
        M: ModelTrait,
        M::Entity: Related<R>,
        R: EnableableEntity,
    {
        // SeaORM joins the parent table to reach `R`
        let mut select = EnabledSelect::new(model.find_related(R::default()), &self.options);
        select.joined = true;
        select
    }

    /// Enable a single record, running its hooks. See [`record::enable`].
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the update fails.
    pub async fn enable<E, M>(&self, model: &mut M) -> Result<bool>
    where
        E: EnableableEntity<Model = M>,
        M: ModelTrait<Entity = E> + IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        record::enable(&self.hooks, &self.conn, model).await
    }

    /// Disable a single record, running its hooks. See [`record::disable`].
    ///
    /// # Errors
    /// Returns `EnableError::Db` if the update fails.
    pub async fn disable<E, M>(&self, model: &mut M) -> Result<bool>
    where
        E: EnableableEntity<Model = M>,
        M: ModelTrait<Entity = E> + IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    {
        record::disable(&self.hooks, &self.conn, model).await
    }
}
