//! nps.gov document extractor
//!
//! Parses the three kinds of pages the site exposes: the national index
//! (state dropdown), a state listing page (result rows), and a site detail
//! page (microdata spans). Parsing is split from fetching: the `*_index` /
//! `*_links` / `*_record` functions are pure over an HTML string, and the
//! async wrappers pull documents through the read-through [`Fetcher`].
//!
//! Field policy: required markers raise [`ScrapeError::MissingElement`] and
//! propagate (a malformed document is fatal to the operation), optional
//! markers degrade to the sentinel strings in [`crate::data`].

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use thiserror::Error;

use super::{SiteRecord, NO_ADDRESS, NO_ZIPCODE};
use crate::cache::CacheStore;
use crate::fetch::{FetchError, Fetcher};

/// Base URL all scraped hrefs are resolved against
pub const BASE_URL: &str = "https://www.nps.gov";

/// Path of the national index page holding the state dropdown
pub const STATES_INDEX_PATH: &str = "/index.htm";

/// Errors that can occur while extracting records from nps.gov documents
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A CSS selector failed to compile
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// A structural marker required by the extraction schema was absent
    #[error("Missing expected element: {0}")]
    MissingElement(String),

    /// An anchor was found but carried no href
    #[error("Missing href attribute on {0}")]
    MissingHref(String),

    /// The underlying document fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Compiles a CSS selector, surfacing failure as a ScrapeError
fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

/// Collects and trims the text content of an element
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts the state-name → state-page-URL mapping from the index page
///
/// Reads the sole state dropdown, taking each entry's display text
/// (lower-cased, trimmed) as the key and its href resolved against
/// `base_url` as the value.
pub fn state_index(html: &str, base_url: &str) -> Result<BTreeMap<String, String>, ScrapeError> {
    let document = Html::parse_document(html);
    let dropdown_sel = selector(".dropdown-menu.SearchBar-keywordSearch")?;
    let link_sel = selector("li a")?;

    let dropdown = document
        .select(&dropdown_sel)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement("state dropdown".to_string()))?;

    let mut states = BTreeMap::new();
    for link in dropdown.select(&link_sel) {
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::MissingHref("state dropdown entry".to_string()))?;
        let name = element_text(link).to_lowercase();
        states.insert(name, format!("{}{}", base_url, href));
    }
    Ok(states)
}

/// Extracts the site detail URLs from a state listing page
///
/// Each result row contributes the href of its first anchor, resolved
/// against `base_url`. A listing page with no rows yields an empty list.
pub fn site_links(html: &str, base_url: &str) -> Result<Vec<String>, ScrapeError> {
    let document = Html::parse_document(html);
    let row_sel = selector("div.col-md-9.col-sm-9.col-xs-12.table-cell.list_left")?;
    let link_sel = selector("a")?;

    let mut links = Vec::new();
    for row in document.select(&row_sel) {
        let link = row
            .select(&link_sel)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement("result row anchor".to_string()))?;
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::MissingHref("result row anchor".to_string()))?;
        links.push(format!("{}{}", base_url, href));
    }
    Ok(links)
}

/// Extracts a [`SiteRecord`] from a site detail page
///
/// Title, designation, and telephone markers are required; locality/region
/// and postal code are optional and fall back to their sentinels.
pub fn site_record(html: &str) -> Result<SiteRecord, ScrapeError> {
    let document = Html::parse_document(html);

    let name = required_text(&document, ".Hero-title", "site title")?;
    let category = required_text(&document, ".Hero-designation", "site designation")?;
    let phone = required_text(&document, "span[itemprop='telephone']", "site telephone")?;

    let address = match (
        optional_text(&document, "span[itemprop='addressLocality']")?,
        optional_text(&document, "span[itemprop='addressRegion']")?,
    ) {
        (Some(city), Some(state)) => format!("{}, {}", city, state),
        _ => NO_ADDRESS.to_string(),
    };

    let zipcode = optional_text(&document, "span[itemprop='postalCode']")?
        .unwrap_or_else(|| NO_ZIPCODE.to_string());

    Ok(SiteRecord {
        category,
        name,
        address,
        zipcode,
        phone,
    })
}

/// Text of the first element matching `css`, erroring when absent
fn required_text(document: &Html, css: &str, what: &str) -> Result<String, ScrapeError> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::MissingElement(what.to_string()))
}

/// Text of the first element matching `css`, `None` when absent
fn optional_text(document: &Html, css: &str) -> Result<Option<String>, ScrapeError> {
    let sel = selector(css)?;
    Ok(document.select(&sel).next().map(element_text))
}

/// Fetches the national index through the cache and extracts the state map
pub async fn build_state_index(
    fetcher: &Fetcher,
    cache: &mut CacheStore,
) -> Result<BTreeMap<String, String>, ScrapeError> {
    let url = format!("{}{}", BASE_URL, STATES_INDEX_PATH);
    let html = fetcher.fetch_page(&url, cache).await?;
    state_index(&html, BASE_URL)
}

/// Fetches one site detail page through the cache and extracts its record
pub async fn site_for_url(
    fetcher: &Fetcher,
    cache: &mut CacheStore,
    site_url: &str,
) -> Result<SiteRecord, ScrapeError> {
    let html = fetcher.fetch_page(site_url, cache).await?;
    site_record(&html)
}

/// Fetches a state listing and every site on it, in listing order
///
/// Each site page goes through the cache individually, so revisiting a
/// state only refetches pages that were never seen before.
pub async fn sites_for_state(
    fetcher: &Fetcher,
    cache: &mut CacheStore,
    state_url: &str,
) -> Result<Vec<SiteRecord>, ScrapeError> {
    let html = fetcher.fetch_page(state_url, cache).await?;
    let links = site_links(&html, BASE_URL)?;

    let mut sites = Vec::with_capacity(links.len());
    for link in &links {
        sites.push(site_for_url(fetcher, cache, link).await?);
    }
    Ok(sites)
}
