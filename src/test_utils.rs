//! Shared test utilities for `FinanceBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{category, expense, income, money, record::RecordInput},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Shorthand for a calendar date. Panics on an invalid date, which is a bug in
/// the test itself.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates a category through the normal creation path.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name).await
}

/// Creates an expense on an explicit date.
///
/// # Arguments
/// * `user_id` - Owner of the expense
/// * `amount` - Decimal string such as `"12.50"`
/// * `on` - Date of the expense
/// * `category_id` - Optional category
///
/// # Defaults
/// * `description`: `"Test expense"`
pub async fn create_test_expense(
    db: &DatabaseConnection,
    user_id: &str,
    amount: &str,
    on: NaiveDate,
    category_id: Option<i64>,
) -> Result<entities::expense::Model> {
    let mut input = RecordInput::new(money::parse_amount(amount)?)
        .with_date(on)
        .with_description("Test expense");
    input.category_id = category_id;
    expense::create_expense(db, user_id, input, on).await
}

/// Creates an income on an explicit date. Same arguments as
/// [`create_test_expense`], with description `"Test income"`.
pub async fn create_test_income(
    db: &DatabaseConnection,
    user_id: &str,
    amount: &str,
    on: NaiveDate,
    category_id: Option<i64>,
) -> Result<entities::income::Model> {
    let mut input = RecordInput::new(money::parse_amount(amount)?)
        .with_date(on)
        .with_description("Test income");
    input.category_id = category_id;
    income::create_income(db, user_id, input, on).await
}
