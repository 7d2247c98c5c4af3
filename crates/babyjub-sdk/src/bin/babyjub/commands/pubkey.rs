//! Pubkey command - derive the public key of the configured key file

use crate::config::Config;
use crate::CommonArgs;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct PubkeyArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn run(config: &Config, _args: PubkeyArgs) -> Result<()> {
    let public = config.signer()?.public_key()?;
    let point = public.point();
    let (x, y) = (point.x.to_biguint(), point.y.to_biguint());

    if config.json_output {
        println!(
            r#"{{"public_key": "{}", "x": "{}", "y": "{}"}}"#,
            public, x, y
        );
    } else if config.quiet {
        println!("{}", public);
    } else {
        println!("  Compressed: {}", public);
        println!("  x: {}", x);
        println!("  y: {}", y);
    }
    Ok(())
}
