//! Category Discord commands - `/category add|list|delete`.
//!
//! Categories are global: every user picks from the same list.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::category,
        errors::{Error, Result},
    };
    use std::fmt::Write;
    use tracing::info;

    /// Parent command for managing categories.
    #[poise::command(
        slash_command,
        subcommands("category_add", "category_list", "category_delete")
    )]
    pub async fn category(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Category command. Available subcommands:\n\
            `/category add` - Create a category\n\
            `/category list` - List all categories\n\
            `/category delete` - Delete a category";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Creates a category. The name is trimmed and capitalized.
    #[poise::command(slash_command, rename = "add")]
    pub async fn category_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category name (e.g., Groceries)"] name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let created = category::create_category(db, &name).await?;

        ctx.say(format!("✅ Created category **{}**", created.name))
            .await?;
        Ok(())
    }

    /// Lists all categories alphabetically.
    #[poise::command(slash_command, rename = "list")]
    pub async fn category_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let categories = category::list_categories(db).await?;

        if categories.is_empty() {
            ctx.say("📂 No categories yet. Create one with `/category add`.")
                .await?;
            return Ok(());
        }

        let mut response = String::from("📂 **Categories**\n\n");
        for c in &categories {
            writeln!(&mut response, "• {}", c.name)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Deletes a category. Server administrators only.
    ///
    /// Categories are shared, so this touches every user's records: expenses
    /// in the category become uncategorized and incomes in it are deleted.
    #[poise::command(
        slash_command,
        rename = "delete",
        guild_only,
        required_permissions = "ADMINISTRATOR",
        default_member_permissions = "ADMINISTRATOR"
    )]
    pub async fn category_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category to delete"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = category::get_category_by_name(db, &name).await? else {
            return Err(Error::CategoryNotFound { name });
        };

        let deletion = category::delete_category(db, existing.id).await?;

        info!(
            "Administrator {} deleted category '{}'",
            ctx.author().id,
            deletion.category.name
        );

        let reply = poise::CreateReply::default()
            .content(format!(
                "✅ Deleted category **{}**. {} expense(s) are now uncategorized, {} income record(s) were deleted.",
                deletion.category.name, deletion.expenses_uncategorized, deletion.incomes_deleted
            ))
            .ephemeral(true);
        ctx.send(reply).await?;

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
