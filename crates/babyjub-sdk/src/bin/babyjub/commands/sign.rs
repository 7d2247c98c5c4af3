//! Sign command - sign a field element with the configured key

use crate::config::Config;
use crate::CommonArgs;
use anyhow::Result;
use babyjub_sdk::parse_field_element;
use clap::Args;
use console::style;

#[derive(Args)]
pub struct SignArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Message as a decimal or 0x-prefixed hex field element
    #[arg(short, long)]
    message: String,
}

pub fn run(config: &Config, args: SignArgs) -> Result<()> {
    let message = parse_field_element(&args.message)?;
    let signer = config.signer()?;

    if config.verbose() {
        println!(
            "{} Signing with {} challenge...",
            style("→").cyan().bold(),
            config.hash
        );
    }

    let signed = signer.sign(&message)?;
    log::debug!("signed message {}", signed.message);

    if config.json_output {
        println!(
            r#"{{"public_key": "{}", "message": "{}", "signature": "{}", "hash": "{}"}}"#,
            signed.public_key, signed.message, signed.signature, signed.hash
        );
    } else if config.quiet {
        println!("{}", signed.signature);
    } else {
        println!();
        println!("  Public key: {}", signed.public_key);
        println!("  Signature:  {}", signed.signature);
    }
    Ok(())
}
