//! Verify command - check a compressed signature against a public key

use super::json_string;
use crate::config::Config;
use crate::CommonArgs;
use anyhow::{Context, Result};
use babyjub_core::{PublicKeyComp, SignatureComp};
use babyjub_sdk::{parse_field_element, verify, SdkError};
use clap::Args;
use console::style;

#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Compressed public key (64 hex characters)
    #[arg(long)]
    pubkey: String,

    /// Message as a decimal or 0x-prefixed hex field element
    #[arg(short, long)]
    message: String,

    /// Compressed signature (128 hex characters)
    #[arg(short, long)]
    signature: String,
}

pub fn run(config: &Config, args: VerifyArgs) -> Result<()> {
    let pubkey: PublicKeyComp = args.pubkey.parse().context("Invalid public key")?;
    let signature: SignatureComp = args.signature.parse().context("Invalid signature")?;
    let message = parse_field_element(&args.message)?;

    let result = verify(&pubkey, &message, &signature, config.hash);

    match result {
        Ok(()) => {
            if config.json_output {
                println!(r#"{{"valid": true, "hash": "{}"}}"#, config.hash);
            } else if !config.quiet {
                println!("{} Signature valid", style("✓").green().bold());
            }
            Ok(())
        }
        Err(e) => {
            if config.json_output {
                println!(
                    r#"{{"valid": false, "error": {}}}"#,
                    json_string(&e.to_string())
                );
            } else if !config.quiet && matches!(e, SdkError::VerificationFailed) {
                println!("{} Signature invalid", style("✗").red().bold());
            }
            Err(e.into())
        }
    }
}
