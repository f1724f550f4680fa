//! Monthly statistics - totals, balance, category breakdown and average daily expense.
//!
//! All sums are exact [`Decimal`] arithmetic. Grouping happens in memory over
//! the month's records, which keeps the cost at O(records in the month).
//! `f64` shows up only in the chart series.

use crate::{
    core::{filter::month_bounds, money},
    entities::{Category, Expense, Income, category, expense, income},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Label used for expenses without a category.
pub const UNCATEGORIZED_LABEL: &str = "Other";

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsPeriod {
    month: u32,
    year: i32,
}

impl StatisticsPeriod {
    /// Creates a period, returning `None` for a month outside 1..=12 or an
    /// unrepresentable year.
    #[must_use]
    pub fn new(month: u32, year: i32) -> Option<Self> {
        month_bounds(month, year).map(|_| Self { month, year })
    }

    /// The month containing `today`.
    #[must_use]
    pub fn current(today: NaiveDate) -> Self {
        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    /// Resolves raw month/year parameters.
    ///
    /// An absent value defaults to today's month or year. If either value is
    /// present but unparsable (or the pair is not a real month), both fall back
    /// to the current month. This never fails.
    #[must_use]
    pub fn resolve(month: Option<&str>, year: Option<&str>, today: NaiveDate) -> Self {
        let current = Self::current(today);

        let month = month.map_or(Ok(current.month), |m| m.trim().parse::<u32>());
        let year = year.map_or(Ok(current.year), |y| y.trim().parse::<i32>());

        match (month, year) {
            (Ok(month), Ok(year)) => Self::new(month, year).unwrap_or_else(|| {
                debug!("Month {month}/{year} is not a calendar month, using current month");
                current
            }),
            _ => {
                debug!("Unparsable statistics parameters, using current month");
                current
            }
        }
    }

    /// Month number, 1..=12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// First and last day of the period.
    pub fn bounds(self) -> Result<(NaiveDate, NaiveDate)> {
        month_bounds(self.month, self.year).ok_or_else(|| Error::Validation {
            message: format!("{}/{} is not a valid month", self.month, self.year),
        })
    }

    /// Whether `today` falls in this period.
    #[must_use]
    pub fn is_current(self, today: NaiveDate) -> bool {
        self.month == today.month() && self.year == today.year()
    }

    /// Number of days to divide by when averaging: days elapsed so far for the
    /// current month, the full month length otherwise.
    #[must_use]
    pub fn days_to_count(self, today: NaiveDate) -> u32 {
        if self.is_current(today) {
            today.day()
        } else {
            month_bounds(self.month, self.year).map_or(0, |(_, last)| last.day())
        }
    }
}

/// Summed expenses for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category id, `None` for uncategorized expenses
    pub category_id: Option<i64>,
    /// Category name, or [`UNCATEGORIZED_LABEL`]
    pub label: String,
    /// Sum of the category's expenses
    pub total: Decimal,
}

/// Statistics for one user and one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStatistics {
    /// The month that was analysed
    pub period: StatisticsPeriod,
    /// Sum of the month's expenses
    pub total_expenses: Decimal,
    /// Sum of the month's incomes
    pub total_income: Decimal,
    /// `total_income - total_expenses`
    pub balance: Decimal,
    /// Divisor used for the daily average
    pub days_counted: u32,
    /// Average expense per day, exact quotient
    pub avg_daily_expense: Decimal,
    /// Expenses per category, largest first
    pub category_breakdown: Vec<CategoryTotal>,
    /// Chart labels, index-aligned with `category_amounts`
    pub category_labels: Vec<String>,
    /// Chart values, index-aligned with `category_labels`
    pub category_amounts: Vec<f64>,
}

/// Divides `total` by `days` without rounding. Zero days yields zero.
///
/// Rounding to cents is left to display code.
#[must_use]
pub fn average_daily(total: Decimal, days: u32) -> Decimal {
    if days == 0 {
        return Decimal::ZERO;
    }
    total / Decimal::from(days)
}

/// Groups expenses by category and sums them, largest total first.
///
/// Expenses without a category are grouped under [`UNCATEGORIZED_LABEL`].
/// Equal totals are ordered by label.
#[must_use]
pub fn category_breakdown(rows: &[(expense::Model, Option<category::Model>)]) -> Vec<CategoryTotal> {
    let mut groups: HashMap<Option<i64>, CategoryTotal> = HashMap::new();

    for (expense, category) in rows {
        let key = category.as_ref().map(|c| c.id);
        groups
            .entry(key)
            .or_insert_with(|| CategoryTotal {
                category_id: key,
                label: category
                    .as_ref()
                    .map_or_else(|| UNCATEGORIZED_LABEL.to_string(), |c| c.name.clone()),
                total: Decimal::ZERO,
            })
            .total += expense.amount();
    }

    let mut breakdown: Vec<CategoryTotal> = groups.into_values().collect();
    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    breakdown
}

/// Splits a breakdown into parallel label and amount vectors for charting.
#[must_use]
pub fn chart_series(breakdown: &[CategoryTotal]) -> (Vec<String>, Vec<f64>) {
    breakdown
        .iter()
        .map(|c| (c.label.clone(), money::to_chart_value(c.total)))
        .unzip()
}

/// Computes the statistics of `user_id` for `period`.
#[instrument(skip(db))]
pub async fn compute_statistics(
    db: &DatabaseConnection,
    user_id: &str,
    period: StatisticsPeriod,
    today: NaiveDate,
) -> Result<MonthlyStatistics> {
    let (first, last) = period.bounds()?;

    let expenses = Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Date.between(first, last))
        .find_also_related(Category)
        .all(db)
        .await?;

    let incomes = Income::find()
        .filter(income::Column::UserId.eq(user_id))
        .filter(income::Column::Date.between(first, last))
        .all(db)
        .await?;

    let total_expenses = money::sum(expenses.iter().map(|(e, _)| e.amount()));
    let total_income = money::sum(incomes.iter().map(income::Model::amount));
    let days_counted = period.days_to_count(today);

    let category_breakdown = category_breakdown(&expenses);
    let (category_labels, category_amounts) = chart_series(&category_breakdown);

    debug!(
        "Statistics for {user_id} {}/{}: {} expenses, {} incomes",
        period.month(),
        period.year(),
        expenses.len(),
        incomes.len()
    );

    Ok(MonthlyStatistics {
        period,
        total_expenses,
        total_income,
        balance: total_income - total_expenses,
        days_counted,
        avg_daily_expense: average_daily(total_expenses, days_counted),
        category_breakdown,
        category_labels,
        category_amounts,
    })
}

/// Resolves raw month/year text with [`StatisticsPeriod::resolve`] and computes
/// the statistics. Malformed parameters fall back to the current month.
pub async fn compute_statistics_for(
    db: &DatabaseConnection,
    user_id: &str,
    month: Option<&str>,
    year: Option<&str>,
    today: NaiveDate,
) -> Result<MonthlyStatistics> {
    let period = StatisticsPeriod::resolve(month, year, today);
    compute_statistics(db, user_id, period, today).await
}

/// All-time income minus all-time expenses for `user_id`.
#[instrument(skip(db))]
pub async fn lifetime_balance(db: &DatabaseConnection, user_id: &str) -> Result<Decimal> {
    let expenses = Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .all(db)
        .await?;
    let incomes = Income::find()
        .filter(income::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    Ok(money::sum(incomes.iter().map(income::Model::amount))
        - money::sum(expenses.iter().map(expense::Model::amount)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_resolve_defaults_and_fallbacks() {
        let today = date(2024, 5, 15);
        let current = StatisticsPeriod::current(today);

        assert_eq!(StatisticsPeriod::resolve(None, None, today), current);
        assert_eq!(
            StatisticsPeriod::resolve(Some("4"), Some("2023"), today),
            StatisticsPeriod::new(4, 2023).unwrap()
        );
        // Only the year supplied: month defaults to the current one
        assert_eq!(
            StatisticsPeriod::resolve(None, Some("2022"), today),
            StatisticsPeriod::new(5, 2022).unwrap()
        );
        // A bad month resets the year too
        assert_eq!(StatisticsPeriod::resolve(Some("abc"), Some("2020"), today), current);
        assert_eq!(StatisticsPeriod::resolve(Some("3"), Some("20x0"), today), current);
        assert_eq!(StatisticsPeriod::resolve(Some("13"), Some("2020"), today), current);
        assert_eq!(StatisticsPeriod::resolve(Some("-1"), None, today), current);
    }

    #[test]
    fn test_days_to_count() {
        let today = date(2024, 5, 7);
        assert_eq!(StatisticsPeriod::current(today).days_to_count(today), 7);
        assert_eq!(StatisticsPeriod::new(4, 2024).unwrap().days_to_count(today), 30);
        assert_eq!(StatisticsPeriod::new(2, 2024).unwrap().days_to_count(today), 29);
        assert_eq!(StatisticsPeriod::new(2, 2023).unwrap().days_to_count(today), 28);
        // Same month number in another year is a completed month
        assert_eq!(StatisticsPeriod::new(5, 2023).unwrap().days_to_count(today), 31);
    }

    #[test]
    fn test_average_daily() {
        assert_eq!(average_daily(dec("700.00"), 7), dec("100.00"));
        assert_eq!(average_daily(dec("300.00"), 30), dec("10.00"));
        // The quotient is kept exact, not rounded to cents
        assert_eq!(average_daily(dec("100.00"), 3), dec("100") / dec("3"));
        assert!(average_daily(dec("100.00"), 3) > dec("33.333"));
        assert_eq!(average_daily(dec("0.05"), 2), dec("0.025"));
        assert_eq!(average_daily(dec("50.00"), 0), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_current_month_average_uses_day_of_month() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date(2024, 5, 7);
        create_test_expense(&db, "user1", "700.00", date(2024, 5, 3), None).await?;

        let stats = compute_statistics(&db, "user1", StatisticsPeriod::current(today), today).await?;
        assert_eq!(stats.total_expenses, dec("700.00"));
        assert_eq!(stats.days_counted, 7);
        assert_eq!(stats.avg_daily_expense, dec("100.00"));

        Ok(())
    }

    #[tokio::test]
    async fn test_past_month_average_uses_full_month() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date(2024, 5, 7);
        create_test_expense(&db, "user1", "100.00", date(2024, 4, 1), None).await?;
        create_test_expense(&db, "user1", "200.00", date(2024, 4, 30), None).await?;

        let period = StatisticsPeriod::new(4, 2024).unwrap();
        let stats = compute_statistics(&db, "user1", period, today).await?;
        assert_eq!(stats.total_expenses, dec("300.00"));
        assert_eq!(stats.days_counted, 30);
        assert_eq!(stats.avg_daily_expense, dec("10.00"));

        Ok(())
    }

    #[tokio::test]
    async fn test_totals_balance_and_breakdown() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date(2024, 5, 20);
        let food = create_test_category(&db, "Food").await?;
        let rent = create_test_category(&db, "Rent").await?;

        create_test_expense(&db, "user1", "12.10", date(2024, 5, 1), Some(food.id)).await?;
        create_test_expense(&db, "user1", "7.90", date(2024, 5, 2), Some(food.id)).await?;
        create_test_expense(&db, "user1", "900.00", date(2024, 5, 1), Some(rent.id)).await?;
        create_test_expense(&db, "user1", "0.10", date(2024, 5, 3), None).await?;
        create_test_expense(&db, "user1", "0.20", date(2024, 5, 4), None).await?;
        create_test_income(&db, "user1", "2500.00", date(2024, 5, 1), None).await?;
        // Outside the month or owned by someone else: ignored
        create_test_expense(&db, "user1", "55.00", date(2024, 4, 30), Some(food.id)).await?;
        create_test_expense(&db, "user2", "99.00", date(2024, 5, 5), Some(rent.id)).await?;
        create_test_income(&db, "user2", "10.00", date(2024, 5, 5), None).await?;

        let stats = compute_statistics(&db, "user1", StatisticsPeriod::current(today), today).await?;

        assert_eq!(stats.total_expenses, dec("920.30"));
        assert_eq!(stats.total_income, dec("2500.00"));
        assert_eq!(stats.balance, stats.total_income - stats.total_expenses);
        assert_eq!(stats.balance, dec("1579.70"));

        let labels: Vec<&str> = stats
            .category_breakdown
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Rent", "Food", UNCATEGORIZED_LABEL]);
        assert_eq!(stats.category_breakdown[1].total, dec("20.00"));
        assert_eq!(stats.category_breakdown[2].total, dec("0.30"));
        assert_eq!(stats.category_breakdown[2].category_id, None);

        // Breakdown sums exactly to the total
        let breakdown_sum = money::sum(stats.category_breakdown.iter().map(|c| c.total));
        assert_eq!(breakdown_sum, stats.total_expenses);

        assert_eq!(stats.category_labels, vec!["Rent", "Food", "Other"]);
        assert_eq!(stats.category_amounts, vec![900.0, 20.0, 0.3]);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_month_is_all_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date(2024, 5, 20);

        let stats = compute_statistics(&db, "nobody", StatisticsPeriod::current(today), today).await?;
        assert_eq!(stats.total_expenses, Decimal::ZERO);
        assert_eq!(stats.total_income, Decimal::ZERO);
        assert_eq!(stats.balance, Decimal::ZERO);
        assert_eq!(stats.avg_daily_expense, Decimal::ZERO);
        assert!(stats.category_breakdown.is_empty());
        assert!(stats.category_labels.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_month_falls_back_to_current() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date(2024, 5, 20);
        create_test_expense(&db, "user1", "40.00", date(2024, 5, 2), None).await?;

        let stats = compute_statistics_for(&db, "user1", Some("abc"), None, today).await?;
        assert_eq!(stats.period, StatisticsPeriod::current(today));
        assert_eq!(stats.total_expenses, dec("40.00"));
        assert_eq!(stats.avg_daily_expense, dec("2.00"));

        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_category_expenses_move_to_other() -> Result<()> {
        let db = setup_test_db().await?;
        let today = date(2024, 5, 20);
        let fun = create_test_category(&db, "Fun").await?;
        create_test_expense(&db, "user1", "15.00", date(2024, 5, 2), Some(fun.id)).await?;
        create_test_expense(&db, "user1", "5.00", date(2024, 5, 3), None).await?;

        crate::core::category::delete_category(&db, fun.id).await?;

        let stats = compute_statistics(&db, "user1", StatisticsPeriod::current(today), today).await?;
        assert_eq!(stats.category_breakdown.len(), 1);
        assert_eq!(stats.category_breakdown[0].label, UNCATEGORIZED_LABEL);
        assert_eq!(stats.category_breakdown[0].total, dec("20.00"));

        Ok(())
    }

    #[tokio::test]
    async fn test_lifetime_balance() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_income(&db, "user1", "1000.00", date(2022, 1, 1), None).await?;
        create_test_expense(&db, "user1", "250.25", date(2023, 6, 1), None).await?;
        create_test_expense(&db, "user1", "49.75", date(2024, 5, 1), None).await?;
        create_test_income(&db, "user2", "5.00", date(2024, 5, 1), None).await?;

        assert_eq!(lifetime_balance(&db, "user1").await?, dec("700.00"));
        assert_eq!(lifetime_balance(&db, "user2").await?, dec("5.00"));

        Ok(())
    }
}
