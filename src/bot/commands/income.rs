//! Income Discord commands - `/income add|edit|delete`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{self, BotData, handlers::autocomplete},
        core::{income, money, report},
        errors::{Error, Result},
    };

    /// Parent command for recording and correcting income.
    #[poise::command(
        slash_command,
        subcommands("income_add", "income_edit", "income_delete")
    )]
    pub async fn income(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Income command. Available subcommands:\n\
            `/income add` - Record income\n\
            `/income edit` - Edit one of your income records\n\
            `/income delete` - Delete one of your income records";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records income. The date defaults to today.
    ///
    /// Income tagged with a category is deleted if that category is deleted.
    #[poise::command(slash_command, rename = "add")]
    pub async fn income_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Amount received (e.g., 1500.00)"] amount: String,
        #[description = "Category name"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        category: Option<String>,
        #[description = "Date as YYYY-MM-DD (defaults to today)"] date: Option<String>,
        #[description = "Optional description"] description: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let amount = money::parse_amount(&amount)?;
        let input = bot::build_record_input(
            db,
            amount,
            category.as_deref(),
            date.as_deref(),
            description,
        )
        .await?;

        let created = income::create_income(db, &user_id, input, bot::today()).await?;

        ctx.say(format!(
            "✅ Recorded income of {} on {} (ID: {})",
            report::format_amount(created.amount()),
            created.date,
            created.id
        ))
        .await?;

        Ok(())
    }

    /// Edits one of your income records. Omitting the date keeps the current one.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn income_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Income ID (shown in /transactions)"] id: i64,
        #[description = "New amount"] amount: String,
        #[description = "New category name (omit for none)"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        category: Option<String>,
        #[description = "New date as YYYY-MM-DD"] date: Option<String>,
        #[description = "New description"] description: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let amount = money::parse_amount(&amount)?;
        let input = bot::build_record_input(
            db,
            amount,
            category.as_deref(),
            date.as_deref(),
            description,
        )
        .await?;

        let updated = income::update_income(db, &user_id, id, input).await?;

        ctx.say(format!(
            "✅ Updated income {}: {} on {}",
            updated.id,
            report::format_amount(updated.amount()),
            updated.date
        ))
        .await?;

        Ok(())
    }

    /// Deletes one of your income records.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn income_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Income ID (shown in /transactions)"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        income::delete_income(db, &user_id, id).await?;

        ctx.say(format!("✅ Deleted income {id}")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
