//! Income entity - Money received by a single user.
//!
//! Amounts are stored as integer cents in `amount_cents`; use [`Model::amount`]
//! to get the exact decimal value. `created_at` is written once on insert.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    /// Unique identifier for the income
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID of the owner
    pub user_id: String,
    /// Amount in cents, never negative
    pub amount_cents: i64,
    /// Optional category; the income is deleted together with it
    pub category_id: Option<i64>,
    /// Calendar day the money was received
    pub date: Date,
    /// Free-text description, may be empty
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Exact amount with two fractional digits.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.amount_cents, 2)
    }
}

/// Defines relationships between Income and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each income optionally belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
