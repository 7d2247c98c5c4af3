//! Hash command - hash field elements, a string or a file

use crate::config::Config;
use crate::CommonArgs;
use anyhow::Result;
use babyjub_sdk::{hash_bytes, hash_elements, hash_file, parse_field_list, HashKind};
use clap::{ArgGroup, Args};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["inputs", "bytes", "file"]),
))]
pub struct HashArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Hash family (poseidon, mimc7, legacy, goldilocks)
    kind: String,

    /// Comma-separated field elements
    #[arg(long)]
    inputs: Option<String>,

    /// UTF-8 string hashed with the family's byte sponge
    #[arg(long)]
    bytes: Option<String>,

    /// File hashed with the family's byte sponge
    #[arg(long)]
    file: Option<PathBuf>,
}

pub fn run(config: &Config, args: HashArgs) -> Result<()> {
    let kind: HashKind = args.kind.parse()?;

    let output = if let Some(inputs) = &args.inputs {
        hash_elements(kind, &parse_field_list(inputs)?)?
    } else if let Some(text) = &args.bytes {
        hash_bytes(kind, text.as_bytes())?
    } else if let Some(path) = &args.file {
        let pb = if config.verbose() {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Hashing {}...", path.display()));
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };
        let result = hash_file(kind, path);
        if let Some(pb) = &pb {
            pb.finish_and_clear();
        }
        result?
    } else {
        anyhow::bail!("One of --inputs, --bytes or --file is required");
    };

    if config.json_output {
        println!(
            r#"{{"hash": "{}", "value": "{}", "hex": "{}"}}"#,
            kind,
            output,
            output.to_hex()
        );
    } else if config.quiet {
        println!("{}", output);
    } else {
        println!("{} {} hash", style("✓").green().bold(), kind);
        println!("  {}", output);
        println!("  0x{}", output.to_hex());
    }
    Ok(())
}
