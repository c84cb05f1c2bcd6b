use pingbar_config::{Config, ConfigKey, config_path, mask_api_key};

use crate::i18n::{Messages, messages};

#[derive(Debug, Clone)]
pub enum ConfigInput {
    Set { key: String, value: String },
    Get { key: String },
    List,
}

/// Strategy for `pingbar config set|get|list`.
///
/// Values are validated by [`Config::set`] before anything is written, so an
/// invalid `set` leaves the file untouched.
#[derive(Debug, Clone, Copy)]
pub struct ConfigStrategy;

impl super::CommandStrategy for ConfigStrategy {
    type Input = ConfigInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match input {
            ConfigInput::Set { key, value } => {
                let key: ConfigKey = key.parse()?;
                config.set(key, &value)?;
                config.save()?;

                let shown = match key {
                    ConfigKey::ApiKey => mask_api_key(&config.api_key),
                    _ => config.get(key),
                };
                println!("{}", messages(config.lang).config_set(key.as_str(), &shown));
            }
            ConfigInput::Get { key } => {
                let key: ConfigKey = key.parse()?;
                println!("{}", or_not_set(messages(config.lang), config.get(key)));
            }
            ConfigInput::List => {
                let msgs = messages(config.lang);
                println!("{}", msgs.config_title);
                for (key, value) in config.list() {
                    println!("  {:<18}{}", key.as_str(), or_not_set(msgs, value));
                }
                println!();
                println!("{}: {}", msgs.config_file, config_path()?.display());
            }
        }
        Ok(())
    }
}

fn or_not_set(msgs: &Messages, value: String) -> String {
    if value.is_empty() {
        msgs.not_set.to_string()
    } else {
        value
    }
}
