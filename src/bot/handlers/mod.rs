//! Discord interaction handlers
//!
//! Handlers for Discord interactions that are not commands themselves.

/// Autocomplete handlers for category and filter names
pub mod autocomplete;
