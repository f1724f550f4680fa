//! Expense Discord commands - `/expense add|edit|delete`.
//!
//! The command author's Discord id is the owner of every expense they touch.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{self, BotData, handlers::autocomplete},
        core::{expense, money, report},
        errors::{Error, Result},
    };

    /// Parent command for recording and correcting expenses.
    #[poise::command(
        slash_command,
        subcommands("expense_add", "expense_edit", "expense_delete")
    )]
    pub async fn expense(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Expense command. Available subcommands:\n\
            `/expense add` - Record an expense\n\
            `/expense edit` - Edit one of your expenses\n\
            `/expense delete` - Delete one of your expenses";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records an expense. The date defaults to today.
    #[poise::command(slash_command, rename = "add")]
    pub async fn expense_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Amount spent (e.g., 12.50)"] amount: String,
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

        let created = expense::create_expense(db, &user_id, input, bot::today()).await?;

        ctx.say(format!(
            "✅ Recorded expense of {} on {} (ID: {})",
            report::format_amount(created.amount()),
            created.date,
            created.id
        ))
        .await?;

        Ok(())
    }

    /// Edits one of your expenses. Omitting the date keeps the current one.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn expense_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense ID (shown in /transactions)"] id: i64,
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

        let updated = expense::update_expense(db, &user_id, id, input).await?;

        ctx.say(format!(
            "✅ Updated expense {}: {} on {}",
            updated.id,
            report::format_amount(updated.amount()),
            updated.date
        ))
        .await?;

        Ok(())
    }

    /// Deletes one of your expenses.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn expense_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Expense ID (shown in /transactions)"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        expense::delete_expense(db, &user_id, id).await?;

        ctx.say(format!("✅ Deleted expense {id}")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
