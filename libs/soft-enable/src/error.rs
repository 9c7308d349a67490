/// Errors that can occur while filtering or toggling enableable entities.
#[derive(thiserror::Error, Debug)]
pub enum EnableError {
    /// Database error occurred during query execution or persistence.
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    /// A query extension was requested by a name that is not registered.
    #[error("call to undefined query extension '{0}'")]
    InvalidCall(String),

    /// The entity shape is not supported by the requested operation.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// Configuration could not be loaded or extracted.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for EnableError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Library-local result type.
pub type Result<T> = std::result::Result<T, EnableError>;
