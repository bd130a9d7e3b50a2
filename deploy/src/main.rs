//! Publishes `CryptoDevToken` against the existing Crypto Devs collection.

mod artifact;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use alloy_primitives::Address;
use anyhow::Context;
use clap::Parser;
use ico_chain::config::{self, ConfirmationPolicy};
use ico_chain::contracts::PendingTransaction;
use ico_chain::rpc::TransactionRequest;
use ico_chain::transaction;
use ico_chain::LocalKeyWallet;
use tracing_subscriber::EnvFilter;

use artifact::Artifact;

#[derive(Parser, Debug)]
#[command(about = "Deploy the CryptoDevToken contract")]
struct Args {
    /// Hardhat artifact holding the creation bytecode.
    #[arg(long, default_value = artifact::DEFAULT_PATH)]
    artifact: PathBuf,

    /// Node endpoint to publish through.
    #[arg(long, env = "QUICKNODE_HTTP_URL")]
    rpc_url: String,

    /// Hex private key of the deploying account.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::from_path(".env").ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };
    match run(args).await {
        Ok(address) => {
            println!("CryptoDev Token Contract Address: {address}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Bad or missing arguments fail with exit code 1 like any other error;
/// `--help` and `--version` still print and exit 0.
fn parse_args<I, T>(argv: I) -> Result<Args, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(argv).map_err(|e| {
        if !e.use_stderr() {
            e.exit();
        }
        eprintln!("{e}");
        ExitCode::FAILURE
    })
}

async fn run(args: Args) -> anyhow::Result<Address> {
    let nft_contract = config::nft_contract_from_env()?;
    let artifact = Artifact::load(&args.artifact)?;
    let wallet = LocalKeyWallet::new(&args.rpc_url, &args.private_key)
        .context("failed to set up the deploying wallet")?;

    let request = TransactionRequest {
        from: Some(wallet.address()),
        to: None,
        value: None,
        data: Some(artifact.deploy_data(nft_contract)),
    };
    let tx = wallet
        .prepare(&request)
        .await
        .context("failed to prepare the deployment")?;
    let expected = transaction::contract_address(wallet.address(), tx.nonce);
    tracing::info!(
        contract = %artifact.contract_name,
        deployer = %wallet.address(),
        %nft_contract,
        %expected,
        "deploying"
    );

    let hash = wallet.send_prepared(&tx).await.context("failed to submit the deployment")?;
    let receipt = PendingTransaction::new(&wallet, hash)
        .wait(&ConfirmationPolicy::default())
        .await
        .with_context(|| format!("deployment {hash} did not complete"))?;

    let address = receipt.contract_address.unwrap_or(expected);
    if address != expected {
        tracing::warn!(%address, %expected, "contract landed at an unexpected address");
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn missing_credentials_fail_with_exit_code_one() {
        std::env::remove_var("QUICKNODE_HTTP_URL");
        std::env::remove_var("PRIVATE_KEY");

        let err = Args::try_parse_from(["deploy"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());

        assert!(parse_args(["deploy"]).is_err());
    }

    #[test]
    fn unknown_flag_is_a_failure() {
        let err = Args::try_parse_from(["deploy", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(parse_args(["deploy", "--bogus"]).is_err());
    }

    #[test]
    fn flags_override_the_defaults() {
        let args = parse_args([
            "deploy",
            "--rpc-url",
            "http://localhost:8545",
            "--private-key",
            "0x01",
        ])
        .unwrap();
        assert_eq!(args.rpc_url, "http://localhost:8545");
        assert_eq!(args.artifact, PathBuf::from(artifact::DEFAULT_PATH));
    }
}
