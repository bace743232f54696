use thiserror::Error;

/// Core error type for the COMMUNE persistence layer.
#[derive(Error, Debug)]
pub enum CommuneError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A forward or reverse schema operation failed for a reason other than
    /// "object already absent/present as expected". Fatal during setup.
    #[error("Schema error in migration '{migration}': {message}")]
    Schema { migration: String, message: String },

    /// A failure during seed insertion. The seed transaction has already been
    /// rolled back in full by the time this is observed.
    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

impl CommuneError {
    pub fn schema(migration: impl Into<String>, message: impl Into<String>) -> Self {
        CommuneError::Schema {
            migration: migration.into(),
            message: message.into(),
        }
    }

    pub fn seed(message: impl Into<String>) -> Self {
        CommuneError::Seed(message.into())
    }
}

/// Result type alias using CommuneError.
pub type Result<T> = std::result::Result<T, CommuneError>;
