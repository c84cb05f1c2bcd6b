//! Business lookup: places, hour snippets and today's availability.

use chrono::{Local, NaiveTime};
use pingbar_cache::CacheStore;
use pingbar_core::{
    BusinessReport, Place, ScheduleExtractor, SearchProvider, filter_by_city, parse_places,
};
use serde_json::value::RawValue;
use tracing::{debug, warn};

/// Cache namespaces. Places and snippet lists share one store, so their keys
/// must never coincide.
const PLACES_PREFIX: &str = "places|";
const SNIPPETS_PREFIX: &str = "horario|";

#[derive(Debug, Clone, Copy)]
pub struct LookupOptions {
    /// Maximum number of candidates returned.
    pub limit: usize,
    /// Candidates (from the top) that get a snippet lookup.
    pub schedule_lookups: usize,
    pub ttl_hours: u32,
}

/// Runs one search against `P`, reading and filling the cache when one is given.
///
/// Cache failures never fail a search: they are logged and the provider is
/// asked instead.
pub struct LookupService<P> {
    provider: P,
    cache: Option<CacheStore>,
    extractor: ScheduleExtractor,
    options: LookupOptions,
}

impl<P: SearchProvider> LookupService<P> {
    pub const fn new(
        provider: P,
        cache: Option<CacheStore>,
        extractor: ScheduleExtractor,
        options: LookupOptions,
    ) -> Self {
        Self {
            provider,
            cache,
            extractor,
            options,
        }
    }

    pub async fn search(&self, business: &str, city: &str) -> anyhow::Result<Vec<BusinessReport>> {
        self.search_at(business, city, Local::now().time()).await
    }

    /// Same as [`Self::search`] with availability evaluated at `now`.
    pub async fn search_at(
        &self,
        business: &str,
        city: &str,
        now: NaiveTime,
    ) -> anyhow::Result<Vec<BusinessReport>> {
        let places = self.places(business, city).await?;
        debug!("{} candidate(s) for {business} in {city}", places.len());

        let mut reports = Vec::with_capacity(places.len());
        for (index, place) in places.into_iter().enumerate() {
            if index >= self.options.schedule_lookups {
                reports.push(BusinessReport::unknown(place));
                continue;
            }
            let snippets = self.snippets(&place.title, city).await;
            let extraction = self.extractor.extract_at(&snippets, now);
            reports.push(BusinessReport::with_extraction(place, extraction));
        }

        Ok(reports)
    }

    async fn places(&self, business: &str, city: &str) -> anyhow::Result<Vec<Place>> {
        let key = format!("{PLACES_PREFIX}{business}");

        if let Some(raw) = self.cached(&key, city) {
            match parse_places(&raw) {
                Ok(places) => return Ok(self.narrow(places, city)),
                Err(e) => warn!("Ignoring undecodable cached places for {business}: {e}"),
            }
        }

        let raw = self
            .provider
            .fetch_places(business, city, self.options.limit)
            .await?;
        let places = parse_places(&raw)?;
        self.remember(&key, city, &raw);

        Ok(self.narrow(places, city))
    }

    fn narrow(&self, places: Vec<Place>, city: &str) -> Vec<Place> {
        let mut places = filter_by_city(places, city, self.options.limit);
        places.truncate(self.options.limit);
        places
    }

    /// Snippets for `name`. A failed fetch yields none, leaving the hours unknown.
    async fn snippets(&self, name: &str, city: &str) -> Vec<String> {
        let key = format!("{SNIPPETS_PREFIX}{name}");

        if let Some(raw) = self.cached(&key, city) {
            match serde_json::from_str::<Vec<String>>(raw.get()) {
                Ok(snippets) => return snippets,
                Err(e) => warn!("Ignoring undecodable cached snippets for {name}: {e}"),
            }
        }

        match self.provider.fetch_snippets(name, city).await {
            Ok(snippets) => {
                match serde_json::value::to_raw_value(&snippets) {
                    Ok(raw) => self.remember(&key, city, &raw),
                    Err(e) => warn!("Could not encode snippets for {name}: {e}"),
                }
                snippets
            }
            Err(e) => {
                warn!("Hours lookup for {name} failed: {e}");
                Vec::new()
            }
        }
    }

    fn cached(&self, business: &str, city: &str) -> Option<Box<RawValue>> {
        let cache = self.cache.as_ref()?;
        cache.lookup(business, city).unwrap_or_else(|e| {
            warn!("Cache read failed for {business}: {e}");
            None
        })
    }

    fn remember(&self, business: &str, city: &str, payload: &RawValue) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.store(business, city, payload, self.options.ttl_hours) {
            warn!("Cache write failed for {business}: {e}");
        }
    }
}
