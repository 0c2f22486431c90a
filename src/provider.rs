//! Decoding of search provider responses that were already fetched.
//!
//! Understands the SerpAPI shape (`organic_results`, `error`) and the Google
//! Custom Search shape (`items`). Provider errors are folded into a
//! [`ProviderStatus`] with an empty item list; the classifier only ever sees
//! items.

use serde::Serialize;
use serde_json::Value;

use crate::data_models::SearchItem;
use crate::error::Result;

const RATE_LIMIT_MARKER: &str = "run out of searches";
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Ok,
    RateLimited,
    NoResults,
    Failed,
}

impl ProviderStatus {
    fn from_error_message(message: &str) -> Self {
        if message.contains(RATE_LIMIT_MARKER) {
            ProviderStatus::RateLimited
        } else if message.contains(NO_RESULTS_MARKER) {
            ProviderStatus::NoResults
        } else {
            ProviderStatus::Failed
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: ProviderStatus,
    pub items: Vec<SearchItem>,
}

impl ProviderResponse {
    pub fn from_json(document: Value) -> Result<Self> {
        if let Some(message) = document.get("error").and_then(Value::as_str) {
            let status = ProviderStatus::from_error_message(message);
            log::warn!("search provider reported an error ({status:?}): {message}");
            return Ok(Self {
                status,
                items: Vec::new(),
            });
        }

        let raw_items = document
            .get("organic_results")
            .or_else(|| document.get("items"))
            .cloned();

        let items = match raw_items {
            Some(Value::Null) | None => Vec::new(),
            Some(list) => serde_json::from_value(list)?,
        };

        Ok(Self {
            status: ProviderStatus::Ok,
            items,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(raw)?)
    }
}
