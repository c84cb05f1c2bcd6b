use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pingbar_cache::DEFAULT_TTL_HOURS;
use pingbar_core::schedule::DEFAULT_MAX_SNIPPETS;
use tracing::debug;

/// Upper bound for `default-limit` and `--limit`.
pub const MAX_LIMIT: usize = 50;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,
    #[serde(default)]
    pub color: ColorMode,
    #[serde(default = "Config::default_limit")]
    pub default_limit: usize,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            lang: Lang::default(),
            default_city: None,
            color: ColorMode::default(),
            default_limit: Self::default_limit(),
            cache: CacheConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_ttl_hours")]
    pub ttl_hours: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: Self::default_ttl_hours(),
        }
    }
}

impl CacheConfig {
    const fn default_ttl_hours() -> u32 {
        DEFAULT_TTL_HOURS
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Snippets scanned per business.
    #[serde(default = "ScheduleConfig::default_max_snippets")]
    pub max_snippets: usize,
    /// How many of the top candidates get a snippet lookup at all.
    #[serde(default = "ScheduleConfig::default_lookups")]
    pub lookups: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_snippets: Self::default_max_snippets(),
            lookups: Self::default_lookups(),
        }
    }
}

impl ScheduleConfig {
    const fn default_max_snippets() -> usize {
        DEFAULT_MAX_SNIPPETS
    }

    const fn default_lookups() -> usize {
        3
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            _ => anyhow::bail!("invalid language: {s} (use 'es' or 'en')"),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Es => "es",
            Self::En => "en",
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    On,
    Off,
    #[default]
    Auto,
}

impl FromStr for ColorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "auto" => Ok(Self::Auto),
            _ => anyhow::bail!("invalid color value: {s} (use 'on', 'off' or 'auto')"),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Auto => "auto",
        })
    }
}

/// Keys accepted by `pingbar config set/get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiKey,
    Lang,
    DefaultCity,
    Color,
    DefaultLimit,
    CacheTtl,
    MaxSnippets,
    ScheduleLookups,
}

impl ConfigKey {
    pub const ALL: [Self; 8] = [
        Self::ApiKey,
        Self::Lang,
        Self::DefaultCity,
        Self::Color,
        Self::DefaultLimit,
        Self::CacheTtl,
        Self::MaxSnippets,
        Self::ScheduleLookups,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "apikey",
            Self::Lang => "lang",
            Self::DefaultCity => "default-city",
            Self::Color => "color",
            Self::DefaultLimit => "default-limit",
            Self::CacheTtl => "cache-ttl",
            Self::MaxSnippets => "max-snippets",
            Self::ScheduleLookups => "schedule-lookups",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("invalid configuration key: {s}"))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn config_dir() -> anyhow::Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot find config directory"))?
        .join("pingbar"))
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn cache_dir() -> anyhow::Result<PathBuf> {
    Ok(dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot find cache directory"))?
        .join("pingbar"))
}

/// Show only the first and last four characters of an API key.
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

impl Config {
    const fn default_limit() -> usize {
        10
    }

    /// Load `~/.config/pingbar/config.json`, or defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Validate and apply a single `key = value` change.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> anyhow::Result<()> {
        match key {
            ConfigKey::ApiKey => value.clone_into(&mut self.api_key),
            ConfigKey::Lang => self.lang = value.parse()?,
            ConfigKey::DefaultCity => {
                self.default_city = (!value.is_empty()).then(|| value.to_string());
            }
            ConfigKey::Color => self.color = value.parse()?,
            ConfigKey::DefaultLimit => {
                self.default_limit = parse_bounded(key, value, 1, MAX_LIMIT)?;
            }
            ConfigKey::CacheTtl => self.cache.ttl_hours = parse_positive(key, value)?,
            ConfigKey::MaxSnippets => self.schedule.max_snippets = parse_positive(key, value)?,
            ConfigKey::ScheduleLookups => {
                self.schedule.lookups = parse_bounded(key, value, 1, MAX_LIMIT)?;
            }
        }
        Ok(())
    }

    /// Current value of `key` as shown to the user. The API key is returned in full.
    #[must_use]
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::ApiKey => self.api_key.clone(),
            ConfigKey::Lang => self.lang.to_string(),
            ConfigKey::DefaultCity => self.default_city.clone().unwrap_or_default(),
            ConfigKey::Color => self.color.to_string(),
            ConfigKey::DefaultLimit => self.default_limit.to_string(),
            ConfigKey::CacheTtl => self.cache.ttl_hours.to_string(),
            ConfigKey::MaxSnippets => self.schedule.max_snippets.to_string(),
            ConfigKey::ScheduleLookups => self.schedule.lookups.to_string(),
        }
    }

    /// Every key with its display value, API key masked.
    #[must_use]
    pub fn list(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| {
                let value = match key {
                    ConfigKey::ApiKey => mask_api_key(&self.api_key),
                    _ => self.get(key),
                };
                (key, value)
            })
            .collect()
    }
}

fn parse_bounded(key: ConfigKey, value: &str, min: usize, max: usize) -> anyhow::Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => anyhow::bail!("invalid value for {key}: {value} (must be between {min} and {max})"),
    }
}

fn parse_positive<T>(key: ConfigKey, value: &str) -> anyhow::Result<T>
where
    T: FromStr + PartialOrd + From<u8>,
{
    match value.trim().parse::<T>() {
        Ok(n) if n >= T::from(1) => Ok(n),
        _ => anyhow::bail!("invalid value for {key}: {value} (must be a positive integer)"),
    }
}
