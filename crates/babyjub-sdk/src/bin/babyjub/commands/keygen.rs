//! Keygen command - create a random private key

use super::json_string;
use crate::config::Config;
use crate::CommonArgs;
use anyhow::Result;
use babyjub_core::PrivateKey;
use babyjub_sdk::write_key_file;
use clap::Args;
use console::style;
use std::path::PathBuf;

#[derive(Args)]
pub struct KeygenArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the key to this file instead of printing it
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run(config: &Config, args: KeygenArgs) -> Result<()> {
    let key = PrivateKey::random();
    let public = key.public()?;

    if let Some(path) = &args.out {
        write_key_file(path, &key)?;
        log::info!("Private key written to {:?}", path);
    }

    if config.json_output {
        match &args.out {
            Some(path) => println!(
                r#"{{"key_file": {}, "public_key": "{}"}}"#,
                json_string(&path.display().to_string()),
                public
            ),
            None => println!(
                r#"{{"private_key": "{}", "public_key": "{}"}}"#,
                key.to_hex(),
                public
            ),
        }
        return Ok(());
    }

    if args.out.is_none() {
        println!("{}", key.to_hex());
    }
    if !config.quiet {
        println!("{} Public key: {}", style("✓").green().bold(), public);
    }
    Ok(())
}
