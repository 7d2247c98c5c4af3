//! babyjub CLI - BabyJubJub EdDSA keys, signatures and hashes
//!
//! Commands for generating keys, signing and verifying field elements,
//! hashing with the supported families and converting point encodings.

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{hash, keygen, point, pubkey, sign, verify};
use console::style;

/// CLI for BabyJubJub EdDSA and ZK-friendly hashes
#[derive(Parser)]
#[command(name = "babyjub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Common options shared across commands
#[derive(Args, Clone, Default)]
pub struct CommonArgs {
    /// Path to the private key file (64 hex characters)
    #[arg(short, long, env = "BABYJUB_KEY")]
    pub key: Option<String>,

    /// Challenge hash for signatures (poseidon, mimc7)
    #[arg(long = "hash", env = "BABYJUB_HASH")]
    pub challenge: Option<String>,

    /// Output format (human, json)
    #[arg(long, default_value = "human")]
    pub output: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new private key
    Keygen(keygen::KeygenArgs),

    /// Print the public key of the configured private key
    Pubkey(pubkey::PubkeyArgs),

    /// Sign a field element
    Sign(sign::SignArgs),

    /// Verify a signature
    Verify(verify::VerifyArgs),

    /// Hash field elements, a string or a file
    Hash(hash::HashArgs),

    /// Convert between affine and compressed points
    #[command(subcommand)]
    Point(point::PointCommands),
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keygen(args) => {
            let config = config::Config::load(&args.common)?;
            keygen::run(&config, args)
        }
        Commands::Pubkey(args) => {
            let config = config::Config::load(&args.common)?;
            pubkey::run(&config, args)
        }
        Commands::Sign(args) => {
            let config = config::Config::load(&args.common)?;
            sign::run(&config, args)
        }
        Commands::Verify(args) => {
            let config = config::Config::load(&args.common)?;
            verify::run(&config, args)
        }
        Commands::Hash(args) => {
            let config = config::Config::load(&args.common)?;
            hash::run(&config, args)
        }
        Commands::Point(cmd) => {
            let common = cmd.common();
            let config = config::Config::load(common)?;
            point::run(&config, cmd)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
