//! Unified error types for `FinanceBuddy`.
//!
//! Every fallible function in the crate returns [`Result`], so database,
//! validation and Discord framework failures all flow through the same enum.

use rust_decimal::Decimal;
use thiserror::Error;

/// Kind of ledger record, used to report which record could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// An expense record
    Expense,
    /// An income record
    Income,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expense => f.write_str("Expense"),
            Self::Income => f.write_str("Income"),
        }
    }
}

/// Application error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is malformed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Amount failed validation (negative, too precise or too large)
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A field failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// Field-level message shown to the user
        message: String,
    },

    /// A category with the same name already exists (case-insensitive)
    #[error("This category already exists: {name}")]
    CategoryExists {
        /// The normalized name that collided
        name: String,
    },

    /// The referenced category does not exist
    #[error("Category not found: {name}")]
    CategoryNotFound {
        /// Name or id of the missing category
        name: String,
    },

    /// The record does not exist or is owned by somebody else
    #[error("{kind} not found: {id}")]
    RecordNotFound {
        /// Which table was searched
        kind: RecordKind,
        /// The requested primary key
        id: i64,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Formatting error while building a response
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Returns true for errors caused by user input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. }
                | Self::Validation { .. }
                | Self::CategoryExists { .. }
                | Self::CategoryNotFound { .. }
                | Self::RecordNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
