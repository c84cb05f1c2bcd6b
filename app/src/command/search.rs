use std::io::IsTerminal;

use chrono::{Datelike, Local};
use pingbar_cache::CacheStore;
use pingbar_config::{ColorMode, Config, Lang, MAX_LIMIT, cache_dir};
use pingbar_core::{ProviderError, ScheduleExtractor};
use pingbar_providers::SerperProvider;
use thiserror::Error;
use tracing::{debug, info};

use crate::i18n::{Messages, messages};
use crate::lookup::{LookupOptions, LookupService};
use crate::render::{Renderer, provider_error_message};

#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub business: String,
    pub city: Option<String>,
    pub json: bool,
    pub lang: Option<Lang>,
    pub no_color: bool,
    pub limit: Option<usize>,
    pub no_cache: bool,
}

/// Search aborted before any request because no API key is configured.
///
/// The setup instructions have already been printed when this is returned.
#[derive(Debug, Error)]
#[error("no API key configured")]
pub struct MissingApiKey;

/// Strategy for the default command: is `<business>` in `<city>` open now?
///
/// # Design
/// - Flags override the stored configuration for this run only
/// - Provider failures surface as localized errors
#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy;

impl super::CommandStrategy for SearchStrategy {
    type Input = SearchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let msgs = messages(input.lang.unwrap_or(config.lang));
        let renderer = Renderer::new(msgs, use_color(config.color, input.no_color));

        if !config.has_api_key() {
            println!("{}", renderer.welcome());
            return Err(MissingApiKey.into());
        }

        let Some(city) = input
            .city
            .or_else(|| config.default_city.clone())
            .filter(|city| !city.trim().is_empty())
        else {
            anyhow::bail!(msgs.missing_city);
        };

        let options = LookupOptions {
            limit: effective_limit(input.limit, config.default_limit),
            schedule_lookups: config.schedule.lookups,
            ttl_hours: config.cache.ttl_hours,
        };
        let cache = if input.no_cache {
            debug!("Cache disabled for this run");
            None
        } else {
            Some(CacheStore::new(cache_dir()?))
        };
        let extractor = ScheduleExtractor::new(config.schedule.max_snippets)?;
        let provider = SerperProvider::new(config.api_key);
        let service = LookupService::new(provider, cache, extractor, options);

        info!(
            "Looking up {} in {city} (limit {})",
            input.business, options.limit
        );
        let reports = service
            .search(&input.business, &city)
            .await
            .map_err(|e| localize(msgs, e))?;

        if input.json {
            println!("{}", renderer.json(&reports, &input.business, &city)?);
        } else {
            print!(
                "{}",
                renderer.text(&reports, &input.business, &city, Local::now().weekday())
            );
        }
        Ok(())
    }
}

fn localize(msgs: &Messages, e: anyhow::Error) -> anyhow::Error {
    if let Some(err) = e.downcast_ref::<ProviderError>() {
        return anyhow::anyhow!(provider_error_message(msgs, err));
    }
    e
}

/// `--limit` wins when positive, capped at [`MAX_LIMIT`].
fn effective_limit(flag: Option<usize>, default_limit: usize) -> usize {
    flag.filter(|&limit| limit > 0)
        .unwrap_or(default_limit)
        .min(MAX_LIMIT)
}

fn use_color(mode: ColorMode, no_color: bool) -> bool {
    if no_color {
        return false;
    }
    match mode {
        ColorMode::On => true,
        ColorMode::Off => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}
