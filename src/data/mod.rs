//! Core data models for Parkscout
//!
//! This module contains the record types produced by the nps.gov extractor
//! and the MapQuest nearby-places lookup, along with the sentinel strings
//! substituted when an optional field cannot be extracted.

pub mod nearby;
pub mod parks;

pub use nearby::{nearby_places, NearbyError};
pub use parks::{build_state_index, site_for_url, sites_for_state, ScrapeError};

use serde::{Deserialize, Serialize};

/// Sentinel used when a site or place has no extractable address
pub const NO_ADDRESS: &str = "no address";
/// Sentinel used when a site has no extractable postal code
pub const NO_ZIPCODE: &str = "no zipcode";
/// Sentinel used when a place has no category
pub const NO_CATEGORY: &str = "no category";
/// Sentinel used when a place has no city
pub const NO_CITY: &str = "no city";

/// A national park site scraped from a detail page
///
/// Immutable after construction; produced only by the extractor in
/// [`parks`]. The postal code doubles as the geocoding anchor for the
/// nearby-places lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Designation of the site (e.g. "National Park"); may be empty
    pub category: String,
    /// Name of the site (e.g. "Isle Royale")
    pub name: String,
    /// City and state (e.g. "Houghton, MI"), or [`NO_ADDRESS`]
    pub address: String,
    /// Postal code (e.g. "49931", "82190-0168"), or [`NO_ZIPCODE`]
    pub zipcode: String,
    /// Phone number (e.g. "(616) 319-7906")
    pub phone: String,
}

impl SiteRecord {
    /// One-line display form: `Name (Category): Address Zipcode`
    pub fn info(&self) -> String {
        format!(
            "{} ({}): {} {}",
            self.name, self.category, self.address, self.zipcode
        )
    }
}

/// A place near a site, derived per-call from a search API response
///
/// Transient: displayed and discarded, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyPlace {
    /// Name of the place
    pub name: String,
    /// Category of the place, or [`NO_CATEGORY`]
    pub category: String,
    /// Street address, or [`NO_ADDRESS`]
    pub address: String,
    /// City, or [`NO_CITY`]
    pub city: String,
}

impl NearbyPlace {
    /// One-line display form: `Name (Category): Address, City`
    pub fn info(&self) -> String {
        format!(
            "{} ({}): {}, {}",
            self.name, self.category, self.address, self.city
        )
    }
}
