//! Autocomplete handlers for Discord slash command parameters.

use crate::{
    bot::BotData,
    core::{category, filter::TransactionFilter},
    errors::Error,
};

/// Discord's limit on autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Suggests category names containing `partial` (case-insensitive).
///
/// Categories come back from the database already sorted by name.
pub async fn autocomplete_category_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(categories) = category::list_categories(db).await else {
        return Vec::new();
    };

    matching_names(categories.into_iter().map(|c| c.name), partial)
}

/// Suggests transaction filter names.
pub async fn autocomplete_filter(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let filters = [
        TransactionFilter::All,
        TransactionFilter::Day,
        TransactionFilter::Week,
        TransactionFilter::Month,
    ];

    matching_names(filters.iter().map(|f| f.as_str().to_string()), partial)
}

fn matching_names<I>(names: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();

    names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}
