//! Core business logic - framework-agnostic ledger, filtering and statistics.
//!
//! Nothing in here reads the wall clock: every function that depends on the
//! current date takes `today` explicitly.

/// Category management and the asymmetric delete cascade
pub mod category;
/// Expense create/edit/delete scoped to the owner
pub mod expense;
/// Transaction listing by day, week, month or all
pub mod filter;
/// Income create/edit/delete scoped to the owner
pub mod income;
/// Exact money validation and conversion
pub mod money;
/// Validated input shared by expenses and incomes
pub mod record;
/// Display formatting for bot responses
pub mod report;
/// Monthly totals, balance, category breakdown and average daily spend
pub mod statistics;
