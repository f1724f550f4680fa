//! Category business logic - Handles creating, finding and deleting categories.
//!
//! Category names are normalized (trimmed, first letter upper-case, the rest
//! lower-case) and must be unique regardless of case. Deleting a category is
//! deliberately asymmetric: expenses keep existing with no category, while
//! incomes tagged with it are deleted.

use crate::{
    config::categories::Config,
    entities::{Category, Expense, Income, category, expense, income},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{debug, info, instrument};

/// Longest accepted category name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Outcome of [`delete_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDeletion {
    /// The category that was removed
    pub category: category::Model,
    /// Expenses whose category was cleared
    pub expenses_uncategorized: u64,
    /// Incomes that were deleted along with the category
    pub incomes_deleted: u64,
}

/// Normalizes a category name: trims whitespace, upper-cases the first
/// character and lower-cases the rest (`"  fOOD "` becomes `"Food"`).
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Retrieves all categories ordered alphabetically by name.
pub async fn list_categories<C>(db: &C) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by name, ignoring case.
///
/// The comparison runs in Rust rather than SQL because `SQLite`'s `LOWER`
/// only folds ASCII.
pub async fn get_category_by_name<C>(db: &C, name: &str) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    let wanted = name.trim().to_lowercase();
    Ok(list_categories(db)
        .await?
        .into_iter()
        .find(|c| c.name.to_lowercase() == wanted))
}

/// Finds a category by its unique ID.
pub async fn get_category_by_id<C>(db: &C, category_id: i64) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a category after normalizing its name.
///
/// # Errors
/// * [`Error::Validation`] if the name is empty or too long
/// * [`Error::CategoryExists`] if the name is taken (case-insensitive)
#[instrument(skip(db))]
pub async fn create_category(db: &DatabaseConnection, name: &str) -> Result<category::Model> {
    let name = normalize_name(name);

    if name.is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::Validation {
            message: format!("Category name must be at most {MAX_NAME_LEN} characters"),
        });
    }
    if get_category_by_name(db, &name).await?.is_some() {
        return Err(Error::CategoryExists { name });
    }

    let model = category::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created category '{}' (id {})", model.name, model.id);
    Ok(model)
}

/// Deletes a category in a single transaction.
///
/// Expenses referencing the category get `category_id = NULL`; incomes
/// referencing it are deleted. This spans all users, so callers must only
/// expose it to administrators.
///
/// # Errors
/// Returns [`Error::CategoryNotFound`] if no category has this id.
#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<CategoryDeletion> {
    let txn = db.begin().await?;

    let category = Category::find_by_id(category_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            name: category_id.to_string(),
        })?;

    let expenses_uncategorized = Expense::update_many()
        .col_expr(
            expense::Column::CategoryId,
            Expr::value(Option::<i64>::None),
        )
        .filter(expense::Column::CategoryId.eq(category_id))
        .exec(&txn)
        .await?
        .rows_affected;

    let incomes_deleted = Income::delete_many()
        .filter(income::Column::CategoryId.eq(category_id))
        .exec(&txn)
        .await?
        .rows_affected;

    Category::delete_by_id(category_id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        "Deleted category '{}': {} expenses uncategorized, {} incomes deleted",
        category.name, expenses_uncategorized, incomes_deleted
    );

    Ok(CategoryDeletion {
        category,
        expenses_uncategorized,
        incomes_deleted,
    })
}

/// Creates every configured category that does not exist yet.
///
/// Returns the number of categories created.
#[instrument(skip_all)]
pub async fn seed_categories(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut created = 0;

    for entry in &config.categories {
        if get_category_by_name(db, &entry.name).await?.is_some() {
            debug!("Category '{}' already exists, skipping", entry.name);
            continue;
        }
        create_category(db, &entry.name).await?;
        created += 1;
    }

    info!("Seeded {created} categories from configuration");
    Ok(created)
}
