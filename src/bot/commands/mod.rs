//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Category management commands
pub mod category;

/// Expense commands
pub mod expense;

/// General utility commands
pub mod general;

/// Income commands
pub mod income;

/// Transaction listing, statistics and balance commands
pub mod stats;

// Export commands
pub use category::*;
pub use expense::*;
pub use general::*;
pub use income::*;
pub use stats::*;
