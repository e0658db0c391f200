use thiserror::Error;

/// Errors that can occur within the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Creating the database directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A campaign with this name already exists (UNIQUE constraint on `name`).
    #[error("Campaign already exists: {name}")]
    DuplicateCampaign { name: String },

    /// Building the export document failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
