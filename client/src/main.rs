//! tipsjar: read-only tip lookups against a Soroban RPC node.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tipsjar_client::render::{render_tip, NOT_FOUND};
use tipsjar_client::units::format_xlm;
use tipsjar_client::{
    init_logging_from_config, ClientConfig, Network, RpcTipReader, TipQuery, TipReader,
    ValidationError, ViewTipForm,
};

#[derive(Parser)]
#[command(name = "tipsjar", about = "Look up tips recorded by the tips jar contract")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, env = "TIPSJAR_CONFIG")]
    config: Option<PathBuf>,

    /// Network to query: "devnet", "testnet" or "mainnet".
    /// Defaults to the config file's network.
    #[arg(long, env = "TIPSJAR_NETWORK")]
    network: Option<Network>,

    /// Contract address, overriding the config file.
    #[arg(long, env = "TIPSJAR_CONTRACT_ID")]
    contract_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Addresses may be given as strkeys or as `test_wallets` names.
#[derive(clap::Subcommand)]
enum Command {
    /// Print the amount of the tip from SENDER to RECIPIENT.
    Amount { sender: String, recipient: String },
    /// Print the amount and message of the tip from SENDER to RECIPIENT.
    View { sender: String, recipient: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(&path.to_string_lossy())
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(contract_id) = cli.contract_id {
        config.contract_id = contract_id;
    }

    init_logging_from_config(&config);
    config.validate()?;
    tracing::debug!(network = ?config.network, rpc = %config.endpoint().rpc_url, "using network");

    let reader = RpcTipReader::from_config(&config)?;
    reader
        .check_network()
        .await
        .with_context(|| format!("unexpected network at {}", reader.rpc_url()))?;

    match cli.command {
        Command::Amount { sender, recipient } => {
            let query = view_query(&config, &sender, &recipient)?;
            let amount = reader
                .get_tip(&config.contract_id, &query.sender, &query.recipient)
                .await?;
            match amount {
                Some(stroops) => println!("{} XLM ({stroops} stroops)", format_xlm(stroops)),
                None => println!("{NOT_FOUND}"),
            }
        }
        Command::View { sender, recipient } => {
            let query = view_query(&config, &sender, &recipient)?;
            let tip = reader
                .get_tip_with_message(&config.contract_id, &query.sender, &query.recipient)
                .await?;
            println!("{}", render_tip(tip.as_ref()));
        }
    }
    Ok(())
}

fn view_query(
    config: &ClientConfig,
    sender: &str,
    recipient: &str,
) -> Result<TipQuery, ValidationError> {
    ViewTipForm {
        sender: config.resolve_wallet(sender).to_string(),
        recipient: config.resolve_wallet(recipient).to_string(),
    }
    .validate()
}
