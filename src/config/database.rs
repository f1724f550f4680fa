//! Database configuration module for `FinanceBuddy`.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs. `categories` is created first because both ledger tables reference it.

use crate::entities::{Category, Expense, Income};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/finance_buddy.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// File path of a `sqlite://` URL, without the query string.
/// `None` for in-memory databases and other backends.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next().unwrap_or_default();
    (!path.is_empty() && path != ":memory:").then(|| Path::new(path))
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// The parent directory of a file-backed `SQLite` database is created first,
/// since `SQLite` only creates the file itself.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();

    if let Some(parent) = sqlite_file_path(&database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    debug!("Connecting to database at {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the `categories`, `expenses` and `incomes` tables if they do not exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut category_table = schema.create_table_from_entity(Category);
    let mut expense_table = schema.create_table_from_entity(Expense);
    let mut income_table = schema.create_table_from_entity(Income);
    category_table.if_not_exists();
    expense_table.if_not_exists();
    income_table.if_not_exists();

    db.execute(builder.build(&category_table)).await?;
    db.execute(builder.build(&expense_table)).await?;
    db.execute(builder.build(&income_table)).await?;

    info!("Database tables ensured (categories, expenses, incomes)");
    Ok(())
}
