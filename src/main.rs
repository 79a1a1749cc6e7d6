mod api;
mod channel;
mod cli_messages;
mod config;
mod consts;
mod controller;
mod environment;
mod events;
mod logging;
mod markup;
mod network;
mod session;
mod ui;
mod workers;

use crate::api::PrState;
use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::SERVER_URL_ENV;
use crate::controller::FilterCriteria;
use crate::environment::Environment;
use crate::session::{
    SnapshotOptions, run_headless_mode, run_snapshot, run_tui_mode, setup_session,
};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the live dashboard in the terminal
    Watch {
        /// Server base URL, e.g. http://localhost:5000
        #[arg(long, value_name = "URL")]
        server: Option<String>,

        /// Use the terminal's own background
        #[arg(long)]
        no_background: bool,
    },
    /// Run without a UI, printing activity and optionally keeping an HTML file current
    Headless {
        #[arg(long, value_name = "URL")]
        server: Option<String>,

        /// Rewrite this HTML document after every load
        #[arg(long, value_name = "PATH")]
        html_out: Option<PathBuf>,
    },
    /// Fetch once and render the page
    Snapshot {
        #[arg(long, value_name = "URL")]
        server: Option<String>,

        /// Only records of this repository ("Unknown" for records without one)
        #[arg(long)]
        repo: Option<String>,

        /// open, closed or merged
        #[arg(long, value_parser = parse_state)]
        state: Option<PrState>,

        #[arg(long)]
        author: Option<String>,

        /// Case-insensitive text matched against title, author and repository
        #[arg(long)]
        search: Option<String>,

        /// Write to a file instead of stdout
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Emit only the card container, not a full document
        #[arg(long)]
        fragment: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Remember the server to use
    SetServer {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Print the configuration
    Show,
    /// Delete the configuration file
    Clear,
}

#[tokio::main]
async fn main() {
    logging::init_max_level();
    let args = Args::parse();
    if let Err(e) = run(args).await {
        print_cmd_error!(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    match args.command {
        Command::Watch {
            server,
            no_background,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let environment = resolve_environment(server.as_deref(), &config)?;
            let session = setup_session(environment, config.filters.clone()).await?;
            run_tui_mode(session, config.with_background_color && !no_background).await
        }
        Command::Headless { server, html_out } => {
            let config = Config::load_or_default(&config_path)?;
            let environment = resolve_environment(server.as_deref(), &config)?;
            let session = setup_session(environment, config.filters.clone()).await?;
            run_headless_mode(session, html_out).await
        }
        Command::Snapshot {
            server,
            repo,
            state,
            author,
            search,
            output,
            fragment,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let environment = resolve_environment(server.as_deref(), &config)?;
            let mut criteria = FilterCriteria::from_values(
                repo.as_deref().unwrap_or(""),
                "",
                author.as_deref().unwrap_or(""),
                search.as_deref().unwrap_or(""),
            );
            criteria.state = state;
            let options = SnapshotOptions {
                criteria,
                output,
                fragment,
            };
            run_snapshot(environment, options).await
        }
        Command::Config { action } => run_config(action, &config_path),
    }
}

fn run_config(action: ConfigAction, config_path: &Path) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::SetServer { url } => {
            let environment = parse_server(&url)?;
            // An unreadable file is replaced rather than patched
            let config = match Config::load_from_file(config_path) {
                Ok(mut config) => {
                    config.server_url = Some(environment.server_url());
                    config
                }
                Err(_) => Config::new(environment.server_url()),
            };
            config
                .save(config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Server saved", "{}", environment.server_url());
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load_or_default(config_path)?;
            print_cmd_info!("Config file", "{}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Clear => {
            if !config_path.exists() {
                print_cmd_warn!("Nothing to clear", "{} does not exist", config_path.display());
                return Ok(());
            }
            Config::clear(config_path)?;
            print_cmd_success!("Config cleared", "{}", config_path.display());
            Ok(())
        }
    }
}

/// Only the states a record can be filtered on.
fn parse_state(value: &str) -> Result<PrState, String> {
    value
        .parse::<PrState>()
        .ok()
        .filter(|state| PrState::FILTERABLE.contains(state))
        .ok_or_else(|| format!("unknown state '{}' (expected open, closed or merged)", value))
}

fn parse_server(url: &str) -> Result<Environment, Box<dyn Error>> {
    url.parse::<Environment>()
        .map_err(|_| format!("Invalid server URL: {} (expected http:// or https://)", url).into())
}

/// The `--server` flag wins, then the config file, then the environment variable.
fn resolve_environment(flag: Option<&str>, config: &Config) -> Result<Environment, Box<dyn Error>> {
    if let Some(url) = flag {
        return parse_server(url);
    }
    if let Some(url) = &config.server_url {
        return parse_server(url);
    }
    match std::env::var(SERVER_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => parse_server(&url),
        _ => Ok(Environment::default()),
    }
}
