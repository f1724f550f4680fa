//! Transaction listing - Returns a user's expenses and incomes for a time window.
//!
//! The window is selected with a [`TransactionFilter`] relative to `today`.
//! Results are always owner-scoped and ordered most recent first (date, then id).
//!
//! The `Week` window is not symmetric between the two record types. Both start
//! at the later of this week's Monday and the first of the month. Expenses stop
//! at this week's Sunday even when it falls in the next month; incomes have no
//! upper bound and are instead restricted to dates whose month equals today's
//! month (any year).

use crate::{
    entities::{Expense, Income, expense, income},
    errors::Result,
};
use chrono::{Datelike, Duration, NaiveDate};
use sea_orm::{QueryOrder, prelude::*};
use std::fmt;
use tracing::{debug, instrument};

/// Time window used to list transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    /// Every record of the user
    #[default]
    All,
    /// Records dated today
    Day,
    /// Records in the current week, clipped to the current month
    Week,
    /// Records in the current month and year
    Month,
}

impl TransactionFilter {
    /// Parses a filter name case-insensitively. Unknown names select [`Self::All`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "day" => Self::Day,
            "week" => Self::Week,
            "month" => Self::Month,
            _ => Self::All,
        }
    }

    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`list_transactions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionList {
    /// Matching expenses, newest first
    pub expenses: Vec<expense::Model>,
    /// Matching incomes, newest first
    pub incomes: Vec<income::Model>,
    /// The filter text as the caller supplied it
    pub filter_echo: String,
}

/// Returns `(lower, sunday)` for the week containing `today`.
///
/// `lower` is the later of this week's Monday and the first day of the month;
/// `sunday` is this week's Sunday, possibly in the following month.
#[must_use]
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let sunday = monday + Duration::days(6);
    let first_of_month = today - Duration::days(i64::from(today.day0()));
    (monday.max(first_of_month), sunday)
}

/// Returns the first and last day of `month` in `year`, or `None` if the month is invalid.
#[must_use]
pub fn month_bounds(month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// Lists the expenses and incomes of `user_id` that fall in the window named by `filter`.
///
/// `filter` is echoed back verbatim in [`TransactionList::filter_echo`].
#[instrument(skip(db))]
pub async fn list_transactions(
    db: &DatabaseConnection,
    user_id: &str,
    filter: &str,
    today: NaiveDate,
) -> Result<TransactionList> {
    let selector = TransactionFilter::parse(filter);

    let mut expenses = Expense::find().filter(expense::Column::UserId.eq(user_id));
    let mut incomes = Income::find().filter(income::Column::UserId.eq(user_id));

    match selector {
        TransactionFilter::All => {}
        TransactionFilter::Day => {
            expenses = expenses.filter(expense::Column::Date.eq(today));
            incomes = incomes.filter(income::Column::Date.eq(today));
        }
        TransactionFilter::Week => {
            let (lower, sunday) = week_bounds(today);
            expenses = expenses.filter(expense::Column::Date.between(lower, sunday));
            incomes = incomes.filter(income::Column::Date.gte(lower));
        }
        TransactionFilter::Month => {
            if let Some((first, last)) = month_bounds(today.month(), today.year()) {
                expenses = expenses.filter(expense::Column::Date.between(first, last));
                incomes = incomes.filter(income::Column::Date.between(first, last));
            }
        }
    }

    let expenses = expenses
        .order_by_desc(expense::Column::Date)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await?;

    let mut incomes = incomes
        .order_by_desc(income::Column::Date)
        .order_by_desc(income::Column::Id)
        .all(db)
        .await?;

    if selector == TransactionFilter::Week {
        incomes.retain(|i| i.date.month() == today.month());
    }

    debug!(
        "Filter '{selector}' for user {user_id}: {} expenses, {} incomes",
        expenses.len(),
        incomes.len()
    );

    Ok(TransactionList {
        expenses,
        incomes,
        filter_echo: filter.to_string(),
    })
}
