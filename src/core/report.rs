//! Report formatting.
//!
//! Pure functions that turn core results into text for the bot layer. Nothing
//! here touches the database.

use crate::{
    core::{
        filter::TransactionList,
        money,
        statistics::{MonthlyStatistics, UNCATEGORIZED_LABEL},
    },
    entities::{category, expense, income},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt::Write;

/// Maximum number of lines per section in a transaction listing.
pub const LIST_LIMIT: usize = 10;

/// Formats an amount as dollars rounded to cents, e.g. `"$12.50"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let amount = money::round_to_cents(amount);
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// Formats an amount with an explicit sign, e.g. `"+$50.00"` or `"-$25.50"`.
#[must_use]
pub fn format_signed_amount(amount: Decimal) -> String {
    let amount = money::round_to_cents(amount);
    if amount >= Decimal::ZERO {
        format!("+${amount:.2}")
    } else {
        format!("-${:.2}", amount.abs())
    }
}

/// Share of `part` in `total` as a percentage (0-100). Zero total yields 0.
#[must_use]
pub fn calculate_share(part: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    money::to_chart_value(part / total * Decimal::ONE_HUNDRED)
}

/// Generates a text bar such as `[████████░░]` for a percentage.
#[must_use]
pub fn format_share_bar(percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percent.clamp(0.0, 100.0);

    // clamped ∈ [0, 100] and length is small, so the cast stays in [0, length]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

fn category_label(names: &HashMap<i64, String>, category_id: Option<i64>) -> &str {
    category_id
        .and_then(|id| names.get(&id))
        .map_or(UNCATEGORIZED_LABEL, String::as_str)
}

fn format_line(id: i64, date: NaiveDate, amount: Decimal, label: &str, description: &str) -> String {
    if description.is_empty() {
        format!("`#{id}` {date} | {} | {label}", format_amount(amount))
    } else {
        format!(
            "`#{id}` {date} | {} | {label} | {description}",
            format_amount(amount)
        )
    }
}

/// One-line summary of an expense.
#[must_use]
pub fn format_expense_line(expense: &expense::Model, names: &HashMap<i64, String>) -> String {
    format_line(
        expense.id,
        expense.date,
        expense.amount(),
        category_label(names, expense.category_id),
        &expense.description,
    )
}

/// One-line summary of an income.
#[must_use]
pub fn format_income_line(income: &income::Model, names: &HashMap<i64, String>) -> String {
    format_line(
        income.id,
        income.date,
        income.amount(),
        category_label(names, income.category_id),
        &income.description,
    )
}

/// Maps category ids to names for the line formatters.
#[must_use]
pub fn category_names(categories: &[category::Model]) -> HashMap<i64, String> {
    categories.iter().map(|c| (c.id, c.name.clone())).collect()
}

/// Renders a transaction listing, at most [`LIST_LIMIT`] lines per section.
pub fn format_transaction_list(
    list: &TransactionList,
    names: &HashMap<i64, String>,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "📒 **Transactions** (filter: `{}`)", list.filter_echo)?;

    writeln!(out, "\n**Expenses** ({})", list.expenses.len())?;
    if list.expenses.is_empty() {
        writeln!(out, "_None_")?;
    }
    for expense in list.expenses.iter().take(LIST_LIMIT) {
        writeln!(out, "{}", format_expense_line(expense, names))?;
    }
    if list.expenses.len() > LIST_LIMIT {
        writeln!(out, "…and {} more", list.expenses.len() - LIST_LIMIT)?;
    }

    writeln!(out, "\n**Income** ({})", list.incomes.len())?;
    if list.incomes.is_empty() {
        writeln!(out, "_None_")?;
    }
    for income in list.incomes.iter().take(LIST_LIMIT) {
        writeln!(out, "{}", format_income_line(income, names))?;
    }
    if list.incomes.len() > LIST_LIMIT {
        writeln!(out, "…and {} more", list.incomes.len() - LIST_LIMIT)?;
    }

    Ok(out)
}

/// Renders monthly statistics with a share bar per category.
pub fn format_statistics(stats: &MonthlyStatistics) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let title = NaiveDate::from_ymd_opt(stats.period.year(), stats.period.month(), 1).map_or_else(
        || format!("{}/{}", stats.period.month(), stats.period.year()),
        |d| d.format("%B %Y").to_string(),
    );

    writeln!(out, "📊 **Statistics for {title}**")?;
    writeln!(out, "**Income:** {}", format_amount(stats.total_income))?;
    writeln!(out, "**Expenses:** {}", format_amount(stats.total_expenses))?;
    writeln!(out, "**Balance:** {}", format_signed_amount(stats.balance))?;
    writeln!(
        out,
        "**Average per day:** {} (over {} days)",
        format_amount(stats.avg_daily_expense),
        stats.days_counted
    )?;

    if !stats.category_breakdown.is_empty() {
        writeln!(out, "\n**By category**")?;
        for entry in &stats.category_breakdown {
            let share = calculate_share(entry.total, stats.total_expenses);
            writeln!(
                out,
                "{} {} - {} ({share:.1}%)",
                format_share_bar(share, Some(10)),
                entry.label,
                format_amount(entry.total)
            )?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::statistics::{CategoryTotal, StatisticsPeriod};
    use chrono::Utc;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(1250, 2)), "$12.50");
        assert_eq!(format_amount(Decimal::new(7, 0)), "$7.00");
        assert_eq!(format_amount(Decimal::new(-305, 2)), "-$3.05");
        assert_eq!(format_amount(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_format_signed_amount() {
        assert_eq!(format_signed_amount(Decimal::new(5000, 2)), "+$50.00");
        assert_eq!(format_signed_amount(Decimal::new(-2550, 2)), "-$25.50");
        assert_eq!(format_signed_amount(Decimal::ZERO), "+$0.00");
    }

    #[test]
    fn test_calculate_share() {
        assert_eq!(calculate_share(Decimal::new(25, 0), Decimal::new(100, 0)), 25.0);
        assert_eq!(calculate_share(Decimal::ONE, Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_format_share_bar() {
        assert_eq!(format_share_bar(100.0, Some(10)), "[██████████]");
        assert_eq!(format_share_bar(50.0, Some(10)), "[█████░░░░░]");
        assert_eq!(format_share_bar(0.0, Some(4)), "[░░░░]");
        assert_eq!(format_share_bar(250.0, None), "[██████████]");
    }

    #[test]
    fn test_format_expense_line_uses_other_for_missing_category() {
        let expense = expense::Model {
            id: 7,
            user_id: "user1".to_string(),
            amount_cents: 1999,
            category_id: None,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            description: "Lunch".to_string(),
            created_at: Utc::now(),
        };

        let line = format_expense_line(&expense, &HashMap::new());
        assert_eq!(line, "`#7` 2024-05-01 | $19.99 | Other | Lunch");
    }

    #[test]
    fn test_format_statistics() {
        let stats = MonthlyStatistics {
            period: StatisticsPeriod::new(4, 2024).unwrap(),
            total_expenses: Decimal::new(300, 0),
            total_income: Decimal::new(1000, 0),
            balance: Decimal::new(700, 0),
            days_counted: 30,
            avg_daily_expense: Decimal::new(10, 0),
            category_breakdown: vec![CategoryTotal {
                category_id: Some(1),
                label: "Food".to_string(),
                total: Decimal::new(300, 0),
            }],
            category_labels: vec!["Food".to_string()],
            category_amounts: vec![300.0],
        };

        let text = format_statistics(&stats).unwrap();
        assert!(text.contains("April 2024"));
        assert!(text.contains("**Balance:** +$700.00"));
        assert!(text.contains("**Average per day:** $10.00 (over 30 days)"));
        assert!(text.contains("[██████████] Food - $300.00 (100.0%)"));
    }

    #[test]
    fn test_format_statistics_rounds_average_for_display() {
        let total = Decimal::new(100, 0);
        let stats = MonthlyStatistics {
            period: StatisticsPeriod::new(6, 2024).unwrap(),
            total_expenses: total,
            total_income: Decimal::ZERO,
            balance: -total,
            days_counted: 3,
            avg_daily_expense: total / Decimal::new(3, 0),
            category_breakdown: Vec::new(),
            category_labels: Vec::new(),
            category_amounts: Vec::new(),
        };

        let text = format_statistics(&stats).unwrap();
        assert!(text.contains("**Average per day:** $33.33 (over 3 days)"));
        assert!(text.contains("**Balance:** -$100.00"));
    }
}
