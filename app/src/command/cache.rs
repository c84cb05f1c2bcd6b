use pingbar_cache::CacheStore;
use pingbar_config::{Config, cache_dir};
use tracing::info;

use crate::i18n::messages;

#[derive(Debug, Clone, Copy)]
pub enum CacheInput {
    Clear,
    Info,
}

/// Strategy for `pingbar cache clear|info`.
///
/// # Design
/// - Stateless: the store is opened on the platform cache directory per call
#[derive(Debug, Clone, Copy)]
pub struct CacheStrategy;

impl super::CommandStrategy for CacheStrategy {
    type Input = CacheInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let msgs = messages(config.lang);
        let store = CacheStore::new(cache_dir()?);

        match input {
            CacheInput::Clear => {
                info!("Clearing cache at {}", store.dir().display());
                store.clear()?;
                println!("{}", msgs.cache_cleared);
            }
            CacheInput::Info => {
                println!("{}", msgs.cache_info_title);
                println!("  {}: {}", msgs.cache_dir, store.dir().display());
                println!("  {}: {}", msgs.cache_entries, store.size()?);
                println!("  {}: {}", msgs.cache_ttl, config.cache.ttl_hours);
            }
        }
        Ok(())
    }
}
