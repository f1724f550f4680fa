//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the `FinanceBuddy` application,
//! including all slash commands, autocomplete handlers, and bot context management.
//! It is the only place that reads the wall clock; the core always receives
//! `today` explicitly.

/// Discord command implementations (expense, income, category, stats, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::{category, record::RecordInput},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use poise::serenity_prelude as serenity;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Date format accepted in command arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Today's date in the bot host's local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parses an optional `YYYY-MM-DD` argument.
///
/// # Errors
/// Returns [`Error::Validation`] when the text is present but not a valid date.
pub fn parse_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::Validation {
                message: format!("Date must look like 2024-05-31, got '{s}'"),
            })
        })
        .transpose()
}

/// Resolves an optional category name to its id.
///
/// # Errors
/// Returns [`Error::CategoryNotFound`] when a name is given but unknown.
pub async fn resolve_category(db: &DatabaseConnection, name: Option<&str>) -> Result<Option<i64>> {
    let Some(name) = name.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    category::get_category_by_name(db, name)
        .await?
        .map(|c| Some(c.id))
        .ok_or_else(|| Error::CategoryNotFound {
            name: name.to_string(),
        })
}

/// Builds a [`RecordInput`] from raw command arguments.
pub async fn build_record_input(
    db: &DatabaseConnection,
    amount: Decimal,
    category_name: Option<&str>,
    date: Option<&str>,
    description: Option<String>,
) -> Result<RecordInput> {
    let mut input = RecordInput::new(amount);
    input.category_id = resolve_category(db, category_name).await?;
    input.date = parse_date(date)?;
    input.description = description.unwrap_or_default();
    Ok(input)
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let reply = if error.is_user_error() {
                format!("❌ {error}")
            } else {
                error!("Error in command `{}`: {:?}", ctx.command().name, error);
                "❌ Something went wrong while processing that command.".to_string()
            };
            if let Err(e) = ctx.say(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework, registers commands globally and runs the
/// gateway client until it stops.
#[instrument(skip(token, database))]
pub async fn run_bot(token: String, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::expense(),
                commands::income(),
                commands::category(),
                commands::transactions(),
                commands::stats(),
                commands::balance(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands globally", framework.options().commands.len());
                Ok(BotData::new(database))
            })
        })
        .build();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, serenity::GatewayIntents::non_privileged())
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(None).unwrap(), None);
        assert_eq!(parse_date(Some("  ")).unwrap(), None);
        assert_eq!(parse_date(Some("2024-02-29")).unwrap(), Some(date(2024, 2, 29)));
        assert!(matches!(
            parse_date(Some("2023-02-29")),
            Err(Error::Validation { .. })
        ));
        assert!(parse_date(Some("31/05/2024")).is_err());
    }

    #[tokio::test]
    async fn test_resolve_category_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        let food = create_test_category(&db, "Food").await?;

        assert_eq!(resolve_category(&db, Some("food")).await?, Some(food.id));
        assert_eq!(resolve_category(&db, None).await?, None);
        assert!(matches!(
            resolve_category(&db, Some("Travel")).await,
            Err(Error::CategoryNotFound { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_build_record_input() -> Result<()> {
        let db = setup_test_db().await?;
        let food = create_test_category(&db, "Food").await?;

        let input = build_record_input(
            &db,
            Decimal::new(1250, 2),
            Some("Food"),
            Some("2024-05-01"),
            Some("Lunch".to_string()),
        )
        .await?;

        assert_eq!(input.category_id, Some(food.id));
        assert_eq!(input.date, Some(date(2024, 5, 1)));
        assert_eq!(input.description, "Lunch");

        Ok(())
    }
}
