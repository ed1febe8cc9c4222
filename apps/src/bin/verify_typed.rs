use std::fs;
use std::path::PathBuf;

use alloy_dyn_abi::TypedData;
use alloy_primitives::{Address, Bytes};
use alloy_provider::ProviderBuilder;
use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use url::Url;

use sigverify::verify_typed_data_signature;

/// CLI to verify an account signature over an EIP-712 typed-data payload.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Account the signature is claimed for.
    #[clap(long)]
    account: Address,

    /// Path to the typed-data JSON (`types`, `primaryType`, `domain`, `message`).
    #[clap(long, value_name = "FILE")]
    typed_data: PathBuf,

    /// Signature as a hex string.
    #[clap(long)]
    signature: Bytes,

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

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }

    let args = Args::parse();

    let raw = fs::read_to_string(&args.typed_data)
        .with_context(|| format!("reading {}", args.typed_data.display()))?;
    let data: TypedData = serde_json::from_str(&raw).context("invalid EIP-712 typed data JSON")?;

    let valid = match &args.rpc_url {
        Some(url) => {
            let provider = ProviderBuilder::new().connect_http(url.clone());
            verify_typed_data_signature(args.account, &data, &args.signature, Some(&provider))
                .await?
        }
        None => verify_typed_data_signature(args.account, &data, &args.signature, None).await?,
    };

    if !valid {
        info!("Signature is INVALID for {:#x}", args.account);
        std::process::exit(1);
    }
    info!("Signature is valid for {:#x}", args.account);
    Ok(())
}
