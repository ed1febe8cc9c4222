use std::fs;
use std::path::PathBuf;

use alloy_primitives::{Address, Bytes};
use alloy_provider::ProviderBuilder;
use anyhow::{bail, Result};
use clap::Parser;
use tracing::{debug, info};
use url::Url;

use sigverify::{verify_message_signature, MessagePrefix};

/// CLI to verify an account signature over a raw message, for both EOA and
/// contract accounts.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Account the signature is claimed for.
    #[clap(long)]
    account: Address,

    /// Message that was signed (mutually exclusive with --message-file).
    #[clap(long, conflicts_with = "message_file")]
    message: Option<String>,

    /// Path to a file whose raw bytes were signed.
    #[clap(long, value_name = "FILE")]
    message_file: Option<PathBuf>,

    /// Signature as a hex string: 65 bytes for an EOA signature, any other
    /// length for a contract-wallet signature blob.
    #[clap(long)]
    signature: Bytes,

    /// Hash with the EIP-191 prefix instead of the UniPass prefix.
    #[clap(long)]
    eip191: bool,

    /// URL of an Ethereum RPC endpoint; required to verify contract-account
    /// signatures via EIP-1271.
    #[clap(short, long, env)]
    rpc_url: Option<Url>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    // Load environment variables if present
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }

    let args = Args::parse();

    let message: Vec<u8> = match (&args.message, &args.message_file) {
        (Some(msg), None) => msg.clone().into_bytes(),
        (None, Some(path)) => fs::read(path)?,
        _ => bail!("exactly one of --message or --message-file is required"),
    };

    let prefix = if args.eip191 {
        MessagePrefix::Eip191
    } else {
        MessagePrefix::Unipass
    };

    let valid = match &args.rpc_url {
        Some(url) => {
            let provider = ProviderBuilder::new().connect_http(url.clone());
            verify_message_signature(
                args.account,
                &message,
                &args.signature,
                prefix,
                Some(&provider),
            )
            .await?
        }
        None => {
            debug!("No RPC endpoint configured; contract-account signatures cannot verify");
            verify_message_signature(args.account, &message, &args.signature, prefix, None).await?
        }
    };

    if !valid {
        info!("Signature is INVALID for {:#x}", args.account);
        std::process::exit(1);
    }
    info!("Signature is valid for {:#x}", args.account);
    Ok(())
}
