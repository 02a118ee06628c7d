//! chainfetch CLI — query a node API and validate what it returns.
//!
//! Usage:
//! ```bash
//! # List the networks a node serves
//! chainfetch networks --url http://localhost:8080
//!
//! # Current status of one network
//! chainfetch status --url http://localhost:8080 --blockchain bitcoin --network mainnet
//!
//! # Balance of an account, retrying up to 5 times
//! chainfetch balance --url http://localhost:8080 --blockchain bitcoin --network mainnet \
//!     --address acct1 --max-retries 5
//! ```

use std::env;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use chainfetch_core::{AccountIdentifier, Fetcher, FetcherConfig, NetworkIdentifier};
use chainfetch_http::HttpTransport;

const URL_ENV: &str = "CHAINFETCH_URL";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling");
            on_ctrl_c.cancel();
        }
    });

    let result = match args[1].as_str() {
        "networks" => cmd_networks(&args[2..], &cancel).await,
        "options" => cmd_options(&args[2..], &cancel).await,
        "status" => cmd_status(&args[2..], &cancel).await,
        "balance" => cmd_balance(&args[2..], &cancel).await,
        "version" | "--version" | "-V" => {
            println!("chainfetch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("chainfetch {}", env!("CARGO_PKG_VERSION"));
    println!("Query a blockchain node API and validate its responses\n");
    println!("USAGE:");
    println!("    chainfetch <COMMAND> [FLAGS]\n");
    println!("COMMANDS:");
    println!("    networks   List networks served by the node");
    println!("    options    Show version, operation statuses/types and errors");
    println!("    status     Show current block, genesis block and peers");
    println!("    balance    Show balances of an account");
    println!("    version    Print version");
    println!("    help       Print this help\n");
    println!("FLAGS:");
    println!("    --url <URL>               Node API base URL  [or ${URL_ENV}]");
    println!("    --blockchain <NAME>       Blockchain name    [options/status/balance]");
    println!("    --network <NAME>          Network name       [options/status/balance]");
    println!("    --sub-network <NAME>      Sub-network name   [optional]");
    println!("    --address <ADDRESS>       Account address    [balance]");
    println!("    --sub-account <ADDRESS>   Sub-account        [optional]");
    println!("    --max-retries <N>         Retry count        [default: 10]");
    println!("    --max-elapsed-secs <N>    Retry time budget  [default: 60]");
}

/// Fetcher plus the retry bounds requested on the command line.
struct Session {
    fetcher: Fetcher,
    max_elapsed_time: Duration,
    max_retries: u64,
}

fn session(args: &[String]) -> anyhow::Result<Session> {
    let url = parse_flag(args, "--url")
        .or_else(|| env::var(URL_ENV).ok())
        .ok_or_else(|| anyhow!("--url is required (or set {URL_ENV})"))?;

    let defaults = FetcherConfig::default();
    let max_retries = match parse_flag(args, "--max-retries") {
        Some(v) => v.parse().context("invalid --max-retries")?,
        None => defaults.max_retries,
    };
    let max_elapsed_time = match parse_flag(args, "--max-elapsed-secs") {
        Some(v) => Duration::from_secs(v.parse().context("invalid --max-elapsed-secs")?),
        None => defaults.max_elapsed_time,
    };

    let transport = HttpTransport::default_for(&url)?;
    Ok(Session {
        fetcher: Fetcher::new(Arc::new(transport), defaults),
        max_elapsed_time,
        max_retries,
    })
}

fn network_flag(args: &[String]) -> anyhow::Result<NetworkIdentifier> {
    let blockchain = parse_flag(args, "--blockchain").context("--blockchain is required")?;
    let network = parse_flag(args, "--network").context("--network is required")?;
    let mut id = NetworkIdentifier::new(blockchain, network);
    if let Some(sub) = parse_flag(args, "--sub-network") {
        id = id.with_sub_network(sub);
    }
    Ok(id)
}

async fn cmd_networks(args: &[String], cancel: &CancellationToken) -> anyhow::Result<()> {
    let s = session(args)?;
    let resp = s
        .fetcher
        .network_list_retry(cancel, s.max_elapsed_time, s.max_retries)
        .await?;

    for network in &resp.network_identifiers {
        println!("{network}");
    }
    Ok(())
}

async fn cmd_options(args: &[String], cancel: &CancellationToken) -> anyhow::Result<()> {
    let s = session(args)?;
    let network = network_flag(args)?;
    let resp = s
        .fetcher
        .network_options_retry(cancel, &network, s.max_elapsed_time, s.max_retries)
        .await?;

    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}

async fn cmd_status(args: &[String], cancel: &CancellationToken) -> anyhow::Result<()> {
    let s = session(args)?;
    let network = network_flag(args)?;
    let resp = s
        .fetcher
        .network_status_retry(cancel, &network, s.max_elapsed_time, s.max_retries)
        .await?;

    if let Some(block) = &resp.current_block_identifier {
        println!("  Current block: {} ({})", block.index, block.hash);
    }
    if let Some(block) = &resp.genesis_block_identifier {
        println!("  Genesis block: {} ({})", block.index, block.hash);
    }
    println!("  Timestamp:     {}", resp.current_block_timestamp);
    println!("  Peers:         {}", resp.peers.len());
    Ok(())
}

async fn cmd_balance(args: &[String], cancel: &CancellationToken) -> anyhow::Result<()> {
    let s = session(args)?;
    let network = network_flag(args)?;
    let address = parse_flag(args, "--address").context("--address is required")?;
    let mut account = AccountIdentifier::new(address);
    if let Some(sub) = parse_flag(args, "--sub-account") {
        account = account.with_sub_account(sub, None);
    }

    let (block, balances) = s
        .fetcher
        .account_balance_retry(cancel, &network, &account, s.max_elapsed_time, s.max_retries)
        .await?;

    println!("  Block: {} ({})", block.index, block.hash);
    for balance in &balances {
        if let Some(account) = &balance.account_identifier {
            println!("  {account}");
        }
        for amount in &balance.amounts {
            println!("    {} {}", amount.value, amount.currency);
        }
    }
    Ok(())
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).cloned()
}
