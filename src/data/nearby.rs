//! MapQuest radius-search client
//!
//! Looks up places near a site's postal code via the MapQuest search API.
//! The raw response is cached by the Fetcher under a parameter-derived key;
//! this module decodes it once at the boundary into typed structs and maps
//! each result to a [`NearbyPlace`] with sentinel fallbacks.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::{NearbyPlace, NO_ADDRESS, NO_CATEGORY, NO_CITY};
use crate::cache::CacheStore;
use crate::fetch::{FetchError, Fetcher};

/// MapQuest radius search endpoint
const SEARCH_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

/// Search radius in miles
const SEARCH_RADIUS: &str = "10";

/// Maximum number of matches to request
const MAX_MATCHES: &str = "10";

/// Errors that can occur during a nearby-places lookup
#[derive(Debug, Error)]
pub enum NearbyError {
    /// Fetching the API response failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The response did not match the expected schema
    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Top-level MapQuest search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "searchResults", default)]
    search_results: Vec<SearchResult>,
}

/// One result entry wrapping its fields object
#[derive(Debug, Deserialize)]
struct SearchResult {
    fields: SearchFields,
}

/// The fields we read from a search result
///
/// Everything but the name is optional; a missing key and a present-but-
/// falsy value degrade to the same sentinel. `group_sic_code_ext` is kept
/// as a raw JSON value because the API is loose about its type, and any
/// falsy payload (null, "", 0, false) must suppress the category.
#[derive(Debug, Deserialize)]
struct SearchFields {
    name: String,
    #[serde(default)]
    group_sic_code_ext: Option<Value>,
    #[serde(default)]
    group_sic_code_name_ext: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

impl From<SearchFields> for NearbyPlace {
    fn from(fields: SearchFields) -> Self {
        let category = if is_truthy(&fields.group_sic_code_ext) {
            non_empty(fields.group_sic_code_name_ext).unwrap_or_else(|| NO_CATEGORY.to_string())
        } else {
            NO_CATEGORY.to_string()
        };

        NearbyPlace {
            name: fields.name,
            category,
            address: non_empty(fields.address).unwrap_or_else(|| NO_ADDRESS.to_string()),
            city: non_empty(fields.city).unwrap_or_else(|| NO_CITY.to_string()),
        }
    }
}

/// Truthiness gate matching the upstream API's loose typing
fn is_truthy(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

/// Collapses absent and empty strings to `None`
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Looks up places within ten miles of a postal code
///
/// The API key is part of the request parameters, so it also participates
/// in the cache key, matching how the raw requests are cached.
pub async fn nearby_places(
    fetcher: &Fetcher,
    cache: &mut CacheStore,
    api_key: &str,
    zipcode: &str,
) -> Result<Vec<NearbyPlace>, NearbyError> {
    let params = [
        ("key", api_key),
        ("origin", zipcode),
        ("radius", SEARCH_RADIUS),
        ("units", "m"),
        ("maxMatches", MAX_MATCHES),
        ("ambiguities", "ignore"),
        ("outFormat", "json"),
    ];

    let value = fetcher.fetch_api(SEARCH_URL, &params, cache).await?;
    let response: SearchResponse = serde_json::from_value(value)?;

    Ok(response
        .search_results
        .into_iter()
        .map(|result| NearbyPlace::from(result.fields))
        .collect())
}
