//! Expense business logic - Creating, editing, fetching and deleting expenses.
//!
//! Every function takes the owner's user id and filters on it. A record owned by
//! someone else is reported exactly like a record that does not exist, so the
//! existence of other users' data never leaks.

use crate::{
    core::record::{self, RecordInput},
    entities::{Expense, expense},
    errors::{Error, RecordKind, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

fn not_found(id: i64) -> Error {
    Error::RecordNotFound {
        kind: RecordKind::Expense,
        id,
    }
}

/// Records a new expense for `user_id`. A missing date defaults to `today`.
///
/// # Errors
/// Validation errors from [`record::validate`]; nothing is written on failure.
#[instrument(skip(db, input))]
pub async fn create_expense(
    db: &DatabaseConnection,
    user_id: &str,
    input: RecordInput,
    today: NaiveDate,
) -> Result<expense::Model> {
    let valid = record::validate(db, input, today).await?;

    let model = expense::ActiveModel {
        user_id: Set(user_id.to_string()),
        amount_cents: Set(valid.amount_cents),
        category_id: Set(valid.category_id),
        date: Set(valid.date),
        description: Set(valid.description),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("User {user_id} recorded expense {} on {}", model.id, model.date);
    Ok(model)
}

/// Fetches one expense owned by `user_id`.
///
/// # Errors
/// [`Error::RecordNotFound`] if the id is unknown or owned by another user.
pub async fn get_expense(
    db: &DatabaseConnection,
    user_id: &str,
    expense_id: i64,
) -> Result<expense::Model> {
    Expense::find_by_id(expense_id)
        .filter(expense::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| not_found(expense_id))
}

/// Replaces the editable fields (amount, category, date, description) of an
/// owned expense. A missing date keeps the stored one; `created_at` never changes.
#[instrument(skip(db, input))]
pub async fn update_expense(
    db: &DatabaseConnection,
    user_id: &str,
    expense_id: i64,
    input: RecordInput,
) -> Result<expense::Model> {
    let existing = get_expense(db, user_id, expense_id).await?;
    let valid = record::validate(db, input, existing.date).await?;

    let mut active: expense::ActiveModel = existing.into();
    active.amount_cents = Set(valid.amount_cents);
    active.category_id = Set(valid.category_id);
    active.date = Set(valid.date);
    active.description = Set(valid.description);

    let updated = active.update(db).await?;
    info!("User {user_id} updated expense {expense_id}");
    Ok(updated)
}

/// Deletes an owned expense.
///
/// # Errors
/// [`Error::RecordNotFound`] if the id is unknown or owned by another user.
#[instrument(skip(db))]
pub async fn delete_expense(db: &DatabaseConnection, user_id: &str, expense_id: i64) -> Result<()> {
    let result = Expense::delete_many()
        .filter(expense::Column::Id.eq(expense_id))
        .filter(expense::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(not_found(expense_id));
    }

    info!("User {user_id} deleted expense {expense_id}");
    Ok(())
}
