//! Income business logic - Creating, editing, fetching and deleting incomes.
//!
//! Every function takes the owner's user id and filters on it. A record owned by
//! someone else is reported exactly like a record that does not exist, so the
//! existence of other users' data never leaks.

use crate::{
    core::record::{self, RecordInput},
    entities::{Income, income},
    errors::{Error, RecordKind, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

fn not_found(id: i64) -> Error {
    Error::RecordNotFound {
        kind: RecordKind::Income,
        id,
    }
}

/// Records a new income for `user_id`. A missing date defaults to `today`.
///
/// # Errors
/// Validation errors from [`record::validate`]; nothing is written on failure.
#[instrument(skip(db, input))]
pub async fn create_income(
    db: &DatabaseConnection,
    user_id: &str,
    input: RecordInput,
    today: NaiveDate,
) -> Result<income::Model> {
    let valid = record::validate(db, input, today).await?;

    let model = income::ActiveModel {
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

    info!("User {user_id} recorded income {} on {}", model.id, model.date);
    Ok(model)
}

/// Fetches one income owned by `user_id`.
///
/// # Errors
/// [`Error::RecordNotFound`] if the id is unknown or owned by another user.
pub async fn get_income(
    db: &DatabaseConnection,
    user_id: &str,
    income_id: i64,
) -> Result<income::Model> {
    Income::find_by_id(income_id)
        .filter(income::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| not_found(income_id))
}

/// Replaces the editable fields (amount, category, date, description) of an
/// owned income. A missing date keeps the stored one; `created_at` never changes.
#[instrument(skip(db, input))]
pub async fn update_income(
    db: &DatabaseConnection,
    user_id: &str,
    income_id: i64,
    input: RecordInput,
) -> Result<income::Model> {
    let existing = get_income(db, user_id, income_id).await?;
    let valid = record::validate(db, input, existing.date).await?;

    let mut active: income::ActiveModel = existing.into();
    active.amount_cents = Set(valid.amount_cents);
    active.category_id = Set(valid.category_id);
    active.date = Set(valid.date);
    active.description = Set(valid.description);

    let updated = active.update(db).await?;
    info!("User {user_id} updated income {income_id}");
    Ok(updated)
}

/// Deletes an owned income.
///
/// # Errors
/// [`Error::RecordNotFound`] if the id is unknown or owned by another user.
#[instrument(skip(db))]
pub async fn delete_income(db: &DatabaseConnection, user_id: &str, income_id: i64) -> Result<()> {
    let result = Income::delete_many()
        .filter(income::Column::Id.eq(income_id))
        .filter(income::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(not_found(income_id));
    }

    info!("User {user_id} deleted income {income_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_create_income_with_explicit_date() -> Result<()> {
        let db = setup_test_db().await?;

        let input = RecordInput::new(Decimal::new(50_000, 2))
            .with_date(date(2024, 2, 29))
            .with_description("Bonus");
        let income = create_income(&db, "user1", input, date(2024, 3, 15)).await?;

        assert_eq!(income.amount(), Decimal::new(500, 0));
        assert_eq!(income.date, date(2024, 2, 29));
        assert_eq!(income.category_id, None);
        assert_eq!(Income::find().count(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_income_moves_date() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_income(&db, "user1", "100.00", date(2024, 3, 1), None).await?;

        let input = RecordInput::new(Decimal::new(12_050, 2)).with_date(date(2024, 4, 1));
        let updated = update_income(&db, "user1", original.id, input).await?;

        assert_eq!(updated.amount_cents, 12_050);
        assert_eq!(updated.date, date(2024, 4, 1));
        assert_eq!(updated.created_at, original.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_income_is_scoped_to_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let income = create_test_income(&db, "owner", "100.00", date(2024, 3, 1), None).await?;

        assert!(matches!(
            delete_income(&db, "intruder", income.id).await,
            Err(Error::RecordNotFound {
                kind: RecordKind::Income,
                ..
            })
        ));
        assert_eq!(get_income(&db, "owner", income.id).await?, income);

        delete_income(&db, "owner", income.id).await?;
        assert_eq!(Income::find().count(&db).await?, 0);

        Ok(())
    }
}
