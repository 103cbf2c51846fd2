//! Fixed assistant replies and recommendation formatting.

use crate::types::CatalogEntry;

/// Shown when the dialogue service fails for any reason.
pub const DIALOGUE_APOLOGY: &str =
    "There was an issue processing your request. Please try again later.";

/// Shown when the catalog service could not be queried.
pub const CATALOG_UNAVAILABLE: &str =
    "I couldn't reach the game catalog right now. Please try again later.";

/// Bulleted recommendation list, one line per entry, in the given order.
pub fn recommendations(phrase: &str, entries: &[CatalogEntry]) -> String {
    let list = entries
        .iter()
        .map(bullet)
        .collect::<Vec<_>>()
        .join("\n");
    format!("Here are some recommendations based on your interest in \"{phrase}\":\n\n{list}")
}

/// Reply for a lookup that matched nothing.
pub fn no_matches(phrase: &str) -> String {
    format!(
        "I couldn't find any games matching \"{phrase}\". Try using a different genre or keyword."
    )
}

fn bullet(entry: &CatalogEntry) -> String {
    format!(
        "- **{}** (Released: {}, Rating: {}, Platforms: {})",
        entry.name, entry.release_date, entry.rating, entry.platforms
    )
}
