//! Reporting Discord commands - `/transactions`, `/stats` and `/balance`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{self, BotData, handlers::autocomplete},
        core::{category, filter::list_transactions, report, statistics},
        errors::{Error, Result},
    };
    use tracing::debug;

    /// Lists your expenses and income for a time window, most recent first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn transactions(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "day, week, month or all (default: all)"]
        #[autocomplete = "autocomplete::autocomplete_filter"]
        filter: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();
        let filter = filter.unwrap_or_else(|| "all".to_string());

        let list = list_transactions(db, &user_id, &filter, bot::today()).await?;
        let names = report::category_names(&category::list_categories(db).await?);

        ctx.say(report::format_transaction_list(&list, &names)?)
            .await?;
        Ok(())
    }

    /// Shows monthly statistics. Month and year default to the current ones.
    #[poise::command(slash_command, prefix_command)]
    pub async fn stats(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Month number 1-12"] month: Option<String>,
        #[description = "Year, e.g. 2024"] year: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let stats = statistics::compute_statistics_for(
            db,
            &user_id,
            month.as_deref(),
            year.as_deref(),
            bot::today(),
        )
        .await?;
        debug!(
            "Chart series for {}/{}: {:?} {:?}",
            stats.period.month(),
            stats.period.year(),
            stats.category_labels,
            stats.category_amounts
        );

        ctx.say(report::format_statistics(&stats)?).await?;
        Ok(())
    }

    /// Shows your all-time balance (income minus expenses).
    #[poise::command(slash_command, prefix_command)]
    pub async fn balance(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let balance = statistics::lifetime_balance(db, &user_id).await?;

        ctx.say(format!(
            "💰 **All-time balance:** {}",
            report::format_signed_amount(balance)
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
