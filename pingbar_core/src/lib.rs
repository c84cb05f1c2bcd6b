#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use serde_json::value::RawValue;

pub mod error;
pub mod places;
pub mod schedule;
pub mod util;

pub use error::ProviderError;
pub use places::{Place, filter_by_city, parse_places};
pub use schedule::{
    Availability, CanonicalTimeRange, Extraction, Heuristic, ScheduleExtractor, ScheduleMatcher,
    ScheduleText, evaluate, normalize_time,
};
pub use util::cache_key;

/// Upstream search backend that supplies business candidates and hour snippets.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch the raw places payload for `business` around `city`.
    ///
    /// The payload is returned untouched so that it can be cached as-is and
    /// decoded later with [`parse_places`].
    async fn fetch_places(
        &self,
        business: &str,
        city: &str,
        limit: usize,
    ) -> Result<Box<RawValue>, ProviderError>;

    /// Fetch free-text snippets that may mention the opening hours of `business`.
    async fn fetch_snippets(&self, business: &str, city: &str)
    -> Result<Vec<String>, ProviderError>;
}

/// A business candidate together with what could be learned about today's hours.
#[derive(Debug, Clone)]
pub struct BusinessReport {
    pub place: Place,
    pub schedule: Option<ScheduleText>,
    pub availability: Availability,
}

impl BusinessReport {
    /// A report for a candidate whose hours were never looked up.
    #[must_use]
    pub const fn unknown(place: Place) -> Self {
        Self {
            place,
            schedule: None,
            availability: Availability::Unknown,
        }
    }

    #[must_use]
    pub fn with_extraction(place: Place, extraction: Extraction) -> Self {
        Self {
            place,
            schedule: extraction.schedule,
            availability: extraction.availability,
        }
    }
}
