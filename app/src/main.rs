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

use std::process::ExitCode;

use clap::{Args, CommandFactory, Parser, Subcommand};
use pingbar_config::{Config, Lang};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;
mod i18n;
mod lookup;
mod render;

use command::{
    AboutStrategy, CacheInput, CacheStrategy, CommandStrategy, ConfigInput, ConfigStrategy,
    MissingApiKey, SearchInput, SearchStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "pingbar")]
#[command(about = "Is it open right now? Opening hours for businesses near you", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    search: SearchArgs,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct SearchArgs {
    /// Business to look for, e.g. "mercadona"
    business: Option<String>,

    /// City to search in (defaults to `default-city`)
    city: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Output language: es or en
    #[arg(long)]
    lang: Option<Lang>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Maximum number of results (1-50)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Skip the local cache for this search
    #[arg(long)]
    no_cache: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage the local result cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Show information about pingbar
    About,
    /// Show version
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set a configuration value
    Set { key: String, value: String },
    /// Print a configuration value
    Get { key: String },
    /// Print every configuration value
    List,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove every cached entry
    Clear,
    /// Show cache location and size
    Info,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(message) = failure_message(&e) {
                eprintln!("Error: {message}");
            }
            ExitCode::FAILURE
        }
    }
}

/// What to print on stderr for a failed run, if anything.
fn failure_message(err: &anyhow::Error) -> Option<String> {
    (!err.is::<MissingApiKey>()).then(|| format!("{err:#}"))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Some(Commands::Config { action }) => {
            let input = match action {
                ConfigAction::Set { key, value } => ConfigInput::Set { key, value },
                ConfigAction::Get { key } => ConfigInput::Get { key },
                ConfigAction::List => ConfigInput::List,
            };
            ConfigStrategy.execute(input).await?;
        }
        Some(Commands::Cache { action }) => {
            let input = match action {
                CacheAction::Clear => CacheInput::Clear,
                CacheAction::Info => CacheInput::Info,
            };
            CacheStrategy.execute(input).await?;
        }
        Some(Commands::About) => AboutStrategy.execute(()).await?,
        Some(Commands::Version) => VersionStrategy.execute(()).await?,
        None => {
            let args = cli.search;
            let Some(business) = args.business else {
                return show_usage(args.lang);
            };
            SearchStrategy
                .execute(SearchInput {
                    business,
                    city: args.city,
                    json: args.json,
                    lang: args.lang,
                    no_color: args.no_color,
                    limit: args.limit,
                    no_cache: args.no_cache,
                })
                .await?;
        }
    }

    Ok(())
}

/// Bare `pingbar`: setup instructions until an API key exists, help afterwards.
fn show_usage(lang: Option<Lang>) -> anyhow::Result<()> {
    let config = Config::load()?;
    if config.has_api_key() {
        Cli::command().print_help()?;
    } else {
        let msgs = i18n::messages(lang.unwrap_or(config.lang));
        println!("{}", render::Renderer::new(msgs, false).welcome());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_fails_without_message() {
        let err = anyhow::Error::from(MissingApiKey);
        assert_eq!(failure_message(&err), None);
    }

    #[test]
    fn other_failures_print_their_chain() {
        let err = anyhow::anyhow!("disk full").context("saving config");
        assert_eq!(
            failure_message(&err).as_deref(),
            Some("saving config: disk full")
        );
    }

    #[test]
    fn search_flags_parse() {
        let cli = Cli::try_parse_from([
            "pingbar", "farmacia", "sevilla", "--json", "--lang", "en", "-l", "5",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.search.business.as_deref(), Some("farmacia"));
        assert_eq!(cli.search.city.as_deref(), Some("sevilla"));
        assert_eq!(cli.search.lang, Some(Lang::En));
        assert_eq!(cli.search.limit, Some(5));
        assert!(cli.search.json);
    }

    #[test]
    fn subcommands_take_precedence() {
        let cli = Cli::try_parse_from(["pingbar", "cache", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Cache {
                action: CacheAction::Clear
            })
        ));
    }
}
