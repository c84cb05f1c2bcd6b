use pingbar_config::Config;

use crate::i18n::messages;

const AUTHOR_URL: &str = "https://github.com/686f6c61";

/// Strategy for the `about` banner, in the configured language.
#[derive(Debug, Clone, Copy)]
pub struct AboutStrategy;

impl super::CommandStrategy for AboutStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let msgs = messages(Config::load()?.lang);

        println!("pingbar v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("{}: {AUTHOR_URL}", msgs.author);
        println!();
        println!("{}", msgs.tagline);
        Ok(())
    }
}
