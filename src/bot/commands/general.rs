//! General Discord commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**FinanceBuddy Help**\n\
        Track your own expenses and income. Amounts look like `12.50`, dates like `2024-05-31`.\n\n\
        **Records**\n\
        • `/expense add <amount> [category] [date] [description]` - Records an expense.\n\
        • `/expense edit <id> <amount> [category] [date] [description]` - Edits one of your expenses.\n\
        • `/expense delete <id>` - Deletes one of your expenses.\n\
        • `/income add|edit|delete` - Same as above, for income.\n\n\
        **Categories**\n\
        • `/category add <name>` - Creates a category.\n\
        • `/category list` - Lists all categories.\n\
        • `/category delete <name>` - Administrators only. Deletes a category for everyone: its expenses become uncategorized, its incomes are deleted.\n\n\
        **Reports**\n\
        • `/transactions [filter]` - Lists your records for `day`, `week`, `month` or `all`.\n\
        • `/stats [month] [year]` - Monthly totals, balance, daily average and category breakdown.\n\
        • `/balance` - All-time income minus expenses.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
