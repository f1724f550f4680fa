//! Category entity - Named tag used to group expenses and incomes for reporting.
//!
//! Names are unique. Deleting a category nulls `category_id` on expenses but
//! removes incomes that reference it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Food", "Transport"), stored capitalized
    #[sea_orm(unique)]
    pub name: String,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category tags many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One category tags many incomes
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incomes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
