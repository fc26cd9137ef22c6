//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod clear_memory;
pub mod model_list;
pub mod say;


use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::cli::clear_memory::run_clear_memory;
use crate::cli::model_list::list_models;
use crate::cli::say::run_say;
use crate::core::config::{resolve_base_url, Config, ConfigKey};
use crate::core::constants::BASE_URL_ENV;
use crate::core::session::SessionController;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_file_logging;

#[derive(Parser, Debug)]
#[command(name = "kwebbel")]
#[command(version, about = "A terminal chat client for the UWV chatbot backend")]
#[command(
    long_about = "Kwebbel is a full-screen terminal front end for a conversational backend. \
It starts a conversation on launch, lets you pick the model the backend should use, \
and can ask the backend to forget the conversation.\n\n\
Environment Variables:\n\
  KWEBBEL_BASE_URL  Backend base URL (default http://localhost:3000/api)\n\
  RUST_LOG          Log filter for --debug-log output (default kwebbel=info)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Ctrl+N            Start a new conversation\n\
  Ctrl+L            Clear the backend memory\n\
  Ctrl+O / F2       Choose a model\n\
  Up/Down/PgUp/PgDn Scroll through the conversation\n\
  Ctrl+C / Esc      Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL, overriding the environment and config file
    #[arg(short = 'b', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// List the models offered by the backend
    Models,
    /// Start a conversation, send one message and print the reply
    Say {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Ask the backend to forget the current conversation
    ClearMemory,
    /// Set configuration values, or print them when no key is given
    Set {
        /// Configuration key to set (base-url, debug-log)
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut config = Config::load()?;

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => {
            let Some(key) = key else {
                config.print_all();
                return Ok(());
            };
            let message = set_config_value(&mut config, &key, value)?;
            config.save()?;
            println!("✅ {message}");
            Ok(())
        }
        Commands::Unset { key } => {
            let message = unset_config_value(&mut config, &key)?;
            config.save()?;
            println!("✅ {message}");
            Ok(())
        }
        command => {
            init_logging(args.debug_log, &config)?;

            let env_base_url = std::env::var(BASE_URL_ENV).ok();
            let base_url = resolve_base_url(
                args.base_url.as_deref(),
                env_base_url.as_deref(),
                &config,
            );
            info!(%base_url, "resolved backend base URL");
            let backend = SessionController::with_base_url(base_url);

            match command {
                Commands::Models => list_models(&backend).await,
                Commands::Say { text } => run_say(&backend, &text.join(" ")).await,
                Commands::ClearMemory => run_clear_memory(&backend).await,
                _ => run_chat(Arc::new(backend)).await,
            }
        }
    }
}

fn init_logging(cli_path: Option<PathBuf>, config: &Config) -> Result<(), Box<dyn Error>> {
    let path = cli_path.or_else(|| config.debug_log.as_ref().map(PathBuf::from));
    if let Some(path) = path {
        init_file_logging(&path)?;
    }
    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey, String> {
    ConfigKey::parse(key).ok_or_else(|| {
        let known: Vec<&str> = ConfigKey::ALL.iter().map(|k| k.as_str()).collect();
        format!("Unknown config key: {key} (expected one of: {})", known.join(", "))
    })
}

/// Apply `kwebbel set <key> <value...>` to `config`. Multi-word values are
/// joined with spaces.
pub fn set_config_value(
    config: &mut Config,
    key: &str,
    value: Option<Vec<String>>,
) -> Result<String, String> {
    let key = parse_key(key)?;
    let value = value.map(|parts| parts.join(" ")).unwrap_or_default();
    if value.trim().is_empty() {
        return Err(format!(
            "No value given for {}; use `kwebbel unset {}` to clear it",
            key.as_str(),
            key.as_str()
        ));
    }
    config.set(key, Some(value.clone()));
    Ok(format!("Set {} to: {value}", key.as_str()))
}

pub fn unset_config_value(config: &mut Config, key: &str) -> Result<String, String> {
    let key = parse_key(key)?;
    config.set(key, None);
    Ok(format!("Unset {}", key.as_str()))
}
