//! Command line front end for signing and verifying Bitcoin signed messages

use std::process::ExitCode;

use bitcoinsig::{Network, PrivateKey, Secp256k1, message_digest, verify_message};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bitcoinsig", about = "Sign and verify Bitcoin signed messages")]
struct Args {
    /// Network whose address version is used (main or test)
    #[arg(long, default_value = "main", value_parser = parse_network, global = true)]
    network: Network,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a message with a WIF private key
    Sign { wif: String, message: String },
    /// Check a base64 signature against an address
    Verify {
        address: String,
        signature: String,
        message: String,
    },
    /// Print the digest a message is signed under
    Digest { message: String },
}

fn parse_network(s: &str) -> Result<Network, String> {
    Network::try_from(s).map_err(|e| e.to_string())
}

fn run(args: Args) -> bitcoinsig::Result<bool> {
    match args.command {
        Command::Sign { wif, message } => {
            let key = PrivateKey::from_wif(&wif)?;
            if key.network != args.network {
                tracing::warn!(key = %key.network, requested = %args.network, "WIF network differs from --network");
            }
            let signature = key.sign_message(&message)?;
            println!("Address:   {}", key.address());
            println!("Signature: {signature}");
            Ok(true)
        }
        Command::Verify {
            address,
            signature,
            message,
        } => {
            let valid = verify_message(
                &Secp256k1,
                &address,
                &signature,
                &message,
                args.network.version_byte(),
            );
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(valid)
        }
        Command::Digest { message } => {
            println!("{}", message_digest(&message)?);
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
