//! Input shared by expense and income forms, and its validation.
//!
//! Validation runs completely before any write, so a rejected submission never
//! leaves a partially saved record behind.

use crate::{
    core::money,
    entities::Category,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, EntityTrait};

/// Fields a user submits when creating or editing an expense or income.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInput {
    /// Amount, must be non-negative with at most two decimal places
    pub amount: Decimal,
    /// Optional category id; must reference an existing category
    pub category_id: Option<i64>,
    /// Date of the record; the caller-supplied default is used when absent
    pub date: Option<NaiveDate>,
    /// Free-text description, surrounding whitespace is stripped
    pub description: String,
}

impl RecordInput {
    /// Creates an input with only an amount; everything else defaults.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self {
            amount,
            category_id: None,
            date: None,
            description: String::new(),
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A [`RecordInput`] that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    /// Amount in cents
    pub amount_cents: i64,
    /// Category id, known to exist at validation time
    pub category_id: Option<i64>,
    /// Resolved date
    pub date: NaiveDate,
    /// Trimmed description
    pub description: String,
}

/// Validates `input`, filling a missing date with `default_date`.
///
/// # Errors
/// * [`Error::InvalidAmount`] for negative or malformed amounts
/// * [`Error::CategoryNotFound`] when `category_id` does not exist
pub async fn validate<C>(db: &C, input: RecordInput, default_date: NaiveDate) -> Result<ValidRecord>
where
    C: ConnectionTrait,
{
    let amount_cents = money::to_cents(input.amount)?;

    if let Some(category_id) = input.category_id {
        Category::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::CategoryNotFound {
                name: category_id.to_string(),
            })?;
    }

    Ok(ValidRecord {
        amount_cents,
        category_id: input.category_id,
        date: input.date.unwrap_or(default_date),
        description: input.description.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_validate_rejects_negative_amount_without_touching_db() -> Result<()> {
        // No query results queued: any database access would fail the test
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let input = RecordInput::new(Decimal::new(-500, 2));
        let result = validate(&db, input, date(2024, 5, 1)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
        assert!(db.into_transaction_log().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_defaults_date_and_trims_description() -> Result<()> {
        let db = setup_test_db().await?;

        let input = RecordInput::new(Decimal::new(1250, 2)).with_description("  Coffee \n");
        let valid = validate(&db, input, date(2024, 5, 1)).await?;

        assert_eq!(valid.amount_cents, 1250);
        assert_eq!(valid.date, date(2024, 5, 1));
        assert_eq!(valid.description, "Coffee");
        assert_eq!(valid.category_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_unknown_category() -> Result<()> {
        let db = setup_test_db().await?;

        let input = RecordInput::new(Decimal::ONE).with_category(999);
        let result = validate(&db, input, date(2024, 5, 1)).await;
        assert!(matches!(result, Err(Error::CategoryNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_keeps_explicit_date() -> Result<()> {
        let db = setup_test_db().await?;
        let food = create_test_category(&db, "Food").await?;

        let input = RecordInput::new(Decimal::ONE)
            .with_category(food.id)
            .with_date(date(2023, 12, 31));
        let valid = validate(&db, input, date(2024, 5, 1)).await?;

        assert_eq!(valid.date, date(2023, 12, 31));
        assert_eq!(valid.category_id, Some(food.id));

        Ok(())
    }
}
