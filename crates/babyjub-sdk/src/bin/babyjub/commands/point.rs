//! Point commands - affine coordinates to and from the 32-byte encoding

use crate::config::Config;
use crate::CommonArgs;
use anyhow::{Context, Result};
use babyjub_core::codec::decode_hex_fixed;
use babyjub_core::Point;
use babyjub_sdk::parse_field_element;
use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum PointCommands {
    /// Compress affine coordinates
    Compress(CompressArgs),
    /// Decompress a 32-byte point encoding
    Decompress(DecompressArgs),
}

impl PointCommands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            PointCommands::Compress(args) => &args.common,
            PointCommands::Decompress(args) => &args.common,
        }
    }
}

#[derive(Args)]
pub struct CompressArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// x coordinate (decimal or 0x hex)
    x: String,

    /// y coordinate (decimal or 0x hex)
    y: String,
}

#[derive(Args)]
pub struct DecompressArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Compressed point (64 hex characters)
    encoded: String,
}

pub fn run(config: &Config, cmd: PointCommands) -> Result<()> {
    match cmd {
        PointCommands::Compress(args) => compress(config, args),
        PointCommands::Decompress(args) => decompress(config, args),
    }
}

fn compress(config: &Config, args: CompressArgs) -> Result<()> {
    let x = parse_field_element(&args.x)?;
    let y = parse_field_element(&args.y)?;
    let point = Point::from_biguints(&x, &y)?;
    anyhow::ensure!(point.in_curve(), "Point ({}, {}) is not on the curve", x, y);

    let encoded = hex::encode(point.compress());
    if config.json_output {
        println!(r#"{{"compressed": "{}"}}"#, encoded);
    } else {
        println!("{}", encoded);
    }
    Ok(())
}

fn decompress(config: &Config, args: DecompressArgs) -> Result<()> {
    let bytes =
        decode_hex_fixed::<32>(args.encoded.trim()).context("Invalid point encoding")?;
    let point = Point::decompress(&bytes)?;
    let (x, y) = (point.x.to_biguint(), point.y.to_biguint());

    if config.json_output {
        println!(
            r#"{{"x": "{}", "y": "{}", "in_sub_group": {}}}"#,
            x,
            y,
            point.in_sub_group()
        );
    } else {
        println!("  x: {}", x);
        println!("  y: {}", y);
        if !config.quiet && !point.in_sub_group() {
            log::warn!("point is not in the prime-order subgroup");
        }
    }
    Ok(())
}
