// Poll Viewer
//
// Terminal front-end for a single on-chain poll. It reads the poll from a
// JSON-RPC node, shows the ballot, tally and chart, and can submit a vote
// through the node's account.
//
// Usage:
//   cargo run --bin poll-viewer -- --poll 0x... --account 0x... --vote 1
//
// Flow:
//   1. Load configuration from command-line arguments and environment variables
//   2. Connect to the node and read the poll metadata
//   3. Build the poll detail component and mount it
//   4. Optionally submit a vote and follow it until the result banner clears

mod render;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use ethers::providers::{Http, Provider};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use poll_adapter::{EthPollContract, EthWallet};
use poll_core::{
    ColorScheme, FetchMode, Poll, PollDetailBuilder, PollDetailConfig, PollDetailError, VoteStatus,
};
use poll_traits::{AccountContext, Address, PollContract};

/// Default JSON-RPC endpoint
const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Viewer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// JSON-RPC endpoint of the node
    pub rpc_url: String,

    /// Poll contract address
    pub poll: Option<String>,

    /// Connected account address
    pub account: Option<String>,

    /// Option index to vote for
    pub vote: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Print the chart document as JSON and exit
    pub json: bool,

    /// Read option counters concurrently
    pub concurrent_fetch: bool,

    /// Use the fixed colour palette instead of random colours
    pub palette: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            poll: None,
            account: None,
            vote: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            concurrent_fetch: false,
            palette: false,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from command-line arguments.
    pub fn from_args() -> Result<Self, Box<dyn std::error::Error>> {
        let args = std::env::args().collect::<Vec<_>>();
        match Self::parse(&args)? {
            Some(config) => Ok(config),
            None => {
                print_usage();
                std::process::exit(0);
            }
        }
    }

    /// Parse an argument vector. Returns `None` when help was requested.
    fn parse(args: &[String]) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        let mut config = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--rpc-url" => {
                    if i + 1 < args.len() {
                        config.rpc_url = args[i + 1].clone();
                        i += 2;
                    } else {
                        return Err("Missing value for --rpc-url".into());
                    }
                }
                "--poll" | "-p" => {
                    if i + 1 < args.len() {
                        config.poll = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        return Err("Missing value for --poll".into());
                    }
                }
                "--account" | "-a" => {
                    if i + 1 < args.len() {
                        config.account = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        return Err("Missing value for --account".into());
                    }
                }
                "--vote" => {
                    if i + 1 < args.len() {
                        config.vote = Some(
                            args[i + 1]
                                .parse()
                                .map_err(|_| format!("Invalid option index: {}", args[i + 1]))?,
                        );
                        i += 2;
                    } else {
                        return Err("Missing value for --vote".into());
                    }
                }
                "--log-level" => {
                    if i + 1 < args.len() {
                        config.log_level = args[i + 1].clone();
                        i += 2;
                    } else {
                        return Err("Missing value for --log-level".into());
                    }
                }
                "--json" => {
                    config.json = true;
                    i += 1;
                }
                "--concurrent-fetch" => {
                    config.concurrent_fetch = true;
                    i += 1;
                }
                "--palette" => {
                    config.palette = true;
                    i += 1;
                }
                "--help" | "-h" => return Ok(None),
                flag => {
                    return Err(format!("Unknown flag or argument: {}", flag).into());
                }
            }
        }

        Ok(Some(config))
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("POLL_RPC_URL") {
            self.rpc_url = url;
        }
        if let Some(poll) = var("POLL_ADDRESS") {
            self.poll = Some(poll);
        }
        if let Some(account) = var("POLL_ACCOUNT") {
            self.account = Some(account);
        }
        if let Some(level) = var("POLL_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err("rpc_url must start with http:// or https://".into());
        }

        let poll = self.poll.as_deref().ok_or("A poll address is required (--poll)")?;
        Address::from_str(poll).map_err(|e| format!("Invalid poll address {}: {}", poll, e))?;

        if let Some(account) = &self.account {
            Address::from_str(account)
                .map_err(|e| format!("Invalid account address {}: {}", account, e))?;
        }

        if self.vote.is_some() && self.account.is_none() {
            return Err("--vote requires --account".into());
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(format!("Invalid log level: {}", self.log_level).into()),
        }

        Ok(())
    }

    /// Component configuration derived from the flags.
    pub fn detail_config(&self) -> PollDetailConfig {
        PollDetailConfig {
            fetch_mode: if self.concurrent_fetch {
                FetchMode::Concurrent
            } else {
                FetchMode::Sequential
            },
            color_scheme: if self.palette {
                ColorScheme::Palette
            } else {
                ColorScheme::Random
            },
            ..PollDetailConfig::default()
        }
    }
}

/// Print usage information.
fn print_usage() {
    println!("Poll Viewer v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    poll-viewer --poll <ADDRESS> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("        --rpc-url <URL>         JSON-RPC endpoint [default: {}]", DEFAULT_RPC_URL);
    println!("    -p, --poll <ADDRESS>        Poll contract address");
    println!("    -a, --account <ADDRESS>     Connected account address");
    println!("        --vote <INDEX>          Submit a vote for the given option");
    println!("        --log-level <LEVEL>     Log level (trace|debug|info|warn|error) [default: {}]", DEFAULT_LOG_LEVEL);
    println!("        --json                  Print the chart document as JSON and exit");
    println!("        --concurrent-fetch      Read option counters concurrently");
    println!("        --palette               Use fixed chart colours");
    println!("    -h, --help                  Print this help information");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    POLL_RPC_URL                JSON-RPC endpoint");
    println!("    POLL_ADDRESS                Poll contract address");
    println!("    POLL_ACCOUNT                Connected account address");
    println!("    POLL_LOG_LEVEL              Log level");
}

/// Initialize logging.
fn init_logging(config: &ViewerConfig) -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(match config.log_level.as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        })
        .write_style(env_logger::WriteStyle::Auto)
        .try_init()
        .context("Failed to initialise logger")
}

/// Main entry point.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ViewerConfig::from_args().map_err(|e| anyhow!(e.to_string()))?;
    config.apply_env(|name| std::env::var(name).ok());

    init_logging(&config)?;
    log::info!("Poll Viewer v{} starting", env!("CARGO_PKG_VERSION"));
    log::debug!("Configuration: {:?}", config);

    config.validate().map_err(|e| anyhow!(e.to_string()))?;

    let poll_address = Address::from_str(config.poll.as_deref().unwrap_or_default())?;
    let account = match &config.account {
        Some(account) => AccountContext::connected(Address::from_str(account)?),
        None => AccountContext::disconnected(),
    };

    log::info!("Connecting to node at {}...", config.rpc_url);
    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
        .with_context(|| format!("Invalid RPC url {}", config.rpc_url))?;
    let client = Arc::new(provider);
    let contract = Arc::new(EthPollContract::new(poll_address, client.clone()));
    let wallet = Arc::new(EthWallet::new(client));

    let info = contract.poll_info().await.context("Failed to read poll")?;
    let poll = Poll::from_info(poll_address, info);
    log::info!("Loaded poll \"{}\" with {} options", poll.title, poll.option_count());

    let voted = match account.address() {
        Some(address) => contract
            .has_voted(&address)
            .await
            .context("Failed to read voting status")?,
        None => false,
    };

    let detail = PollDetailBuilder::new()
        .poll(poll)
        .account(account)
        .voted(voted)
        .contract(contract)
        .wallet(wallet)
        .config(config.detail_config())
        .build()?;

    detail.construct().await?;
    detail.mount().await?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&render::chart_json(&detail.view()))?);
        detail.unmount();
        return Ok(());
    }

    println!("{}", render::render(&detail.view()));

    let Some(index) = config.vote else {
        detail.unmount();
        return Ok(());
    };

    detail.select(index)?;
    let mut rx = detail.subscribe();
    match detail.vote().await {
        Ok(tx) => log::info!("Submitted vote transaction {}", tx),
        Err(PollDetailError::Submission(message)) => log::error!("Vote rejected: {}", message),
        Err(e) => {
            detail.unmount();
            return Err(e.into());
        }
    }
    let view = rx.borrow_and_update().clone();
    println!();
    println!("{}", render::render(&view));

    let cancel_token = CancellationToken::new();
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    // Follow the vote until its result banner has been dismissed.
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                println!();
                println!("{}", render::render(&view));
                if view.status == VoteStatus::Idle {
                    break;
                }
            }
            _ = cancel_token.cancelled() => {
                log::info!("Interrupted, shutting down");
                break;
            }
        }
    }

    detail.unmount();
    log::info!("Shutdown complete");
    Ok(())
}
