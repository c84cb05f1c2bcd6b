//! Business candidates as returned by a places search.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Place {
    pub title: String,
    pub address: String,
    pub rating: f64,
    pub rating_count: u32,
    pub category: String,
    pub phone_number: String,
    pub website: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlacesResponse {
    places: Vec<Place>,
}

/// Decode a raw places payload.
pub fn parse_places(raw: &RawValue) -> Result<Vec<Place>, serde_json::Error> {
    let response: PlacesResponse = serde_json::from_str(raw.get())?;
    Ok(response.places)
}

/// Keep the places whose address mentions `city`, capped at `limit`.
///
/// Upstream results are often padded with nearby towns. When nothing matches
/// the city, the unfiltered list is returned so the user still sees something.
#[must_use]
pub fn filter_by_city(places: Vec<Place>, city: &str, limit: usize) -> Vec<Place> {
    let city = city.to_lowercase();
    let mut local: Vec<Place> = places
        .iter()
        .filter(|place| place.address.to_lowercase().contains(&city))
        .cloned()
        .collect();

    if local.is_empty() {
        return places;
    }

    local.truncate(limit);
    local
}
