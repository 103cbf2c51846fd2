//! Game-catalog search client.
//!
//! Queries the RAWG-style `games` endpoint by tag and normalizes each game
//! into a fully populated [`CatalogEntry`].

use async_trait::async_trait;
use pixelseeker_core::config::CatalogConfig;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CatalogError, FailureKind};
use crate::types::CatalogEntry;

const UNKNOWN_RELEASE: &str = "Unknown";
const UNKNOWN_RATING: &str = "N/A";
const UNKNOWN_PLATFORMS: &str = "Not listed";
const UNKNOWN_NAME: &str = "Untitled";

/// Outcome of a catalog lookup.
///
/// Keeps "nothing matched" apart from "the lookup failed" so the caller
/// can tell the user which one happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLookup {
    Matches(Vec<CatalogEntry>),
    NoMatches,
    Failed(FailureKind),
}

impl CatalogLookup {
    /// Fold a raw client result into a lookup outcome, logging failures.
    pub fn from_result(phrase: &str, result: Result<Vec<CatalogEntry>, CatalogError>) -> Self {
        match result {
            Ok(entries) if entries.is_empty() => CatalogLookup::NoMatches,
            Ok(entries) => CatalogLookup::Matches(entries),
            Err(e) => {
                tracing::warn!(phrase = %phrase, kind = %e.kind(), error = %e, "Catalog lookup failed");
                CatalogLookup::Failed(e.kind())
            }
        }
    }
}

/// Anything that can answer a catalog lookup. Never fails past this boundary.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn lookup(&self, phrase: &str) -> CatalogLookup;
}

// =============================================================================
// RawgCatalogClient
// =============================================================================

/// HTTP client for the catalog search service.
#[derive(Clone)]
pub struct RawgCatalogClient {
    client: Client,
    endpoint: String,
    api_key: String,
    page_size: u32,
}

impl RawgCatalogClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, page_size: u32) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            page_size,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.endpoint, &config.api_key, config.page_size)
    }

    /// Run one search request and normalize the results.
    ///
    /// Zero matches is `Ok(vec![])`, not an error.
    pub async fn fetch(&self, phrase: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let page_size = self.page_size.to_string();
        tracing::debug!(phrase = %phrase, page_size = self.page_size, "Querying catalog");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("tags", phrase),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        let payload: SearchResponse =
            serde_json::from_str(&body).map_err(|e| CatalogError::Malformed(e.to_string()))?;

        let entries = normalize(payload);
        tracing::debug!(phrase = %phrase, count = entries.len(), "Catalog lookup complete");
        Ok(entries)
    }
}

#[async_trait]
impl CatalogSource for RawgCatalogClient {
    async fn lookup(&self, phrase: &str) -> CatalogLookup {
        CatalogLookup::from_result(phrase, self.fetch(phrase).await)
    }
}

// =============================================================================
// Wire format
// =============================================================================

/// Only the envelope is typed. Each game is read field by field so one
/// oddly shaped game or field cannot fail the whole page.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

/// Upstream order is preserved. Entries that are not objects are skipped.
fn normalize(payload: SearchResponse) -> Vec<CatalogEntry> {
    payload
        .results
        .unwrap_or_default()
        .iter()
        .filter(|game| game.is_object())
        .map(normalize_game)
        .collect()
}

fn normalize_game(game: &Value) -> CatalogEntry {
    CatalogEntry {
        name: non_empty(&game["name"]).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        release_date: non_empty(&game["released"]).unwrap_or_else(|| UNKNOWN_RELEASE.to_string()),
        rating: format_rating(&game["rating"]),
        platforms: format_platforms(&game["platforms"]),
    }
}

fn non_empty(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Numbers and numeric strings render the same way; other text passes through.
fn format_rating(rating: &Value) -> String {
    let number = match rating {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(r) => Some(r),
            Err(_) => return non_empty(rating).unwrap_or_else(|| UNKNOWN_RATING.to_string()),
        },
        _ => None,
    };
    match number {
        Some(r) if r.is_finite() && r != 0.0 => r.to_string(),
        _ => UNKNOWN_RATING.to_string(),
    }
}

fn format_platforms(platforms: &Value) -> String {
    let names: Vec<String> = platforms
        .as_array()
        .map(|slots| {
            slots
                .iter()
                .filter_map(|slot| non_empty(&slot["platform"]["name"]))
                .collect()
        })
        .unwrap_or_default();
    if names.is_empty() {
        UNKNOWN_PLATFORMS.to_string()
    } else {
        names.join(", ")
    }
}
