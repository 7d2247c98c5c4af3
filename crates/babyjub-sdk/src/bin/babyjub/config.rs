//! Configuration handling for the babyjub CLI
//!
//! Priority: CLI flags > environment variables > config file > defaults

use anyhow::{Context, Result};
use babyjub_core::{ChallengeHash, PrivateKey};
use babyjub_sdk::{read_key_file, BabyJubSigner, SignerConfig};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

/// Resolved configuration for CLI commands
pub struct Config {
    pub key_path: Option<PathBuf>,
    pub hash: ChallengeHash,
    pub quiet: bool,
    pub json_output: bool,
}

impl Config {
    /// Load configuration from file, environment, and CLI args
    pub fn load(common: &super::CommonArgs) -> Result<Self> {
        let file_config = ConfigFile::load().ok();
        Self::resolve(common, file_config.as_ref())
    }

    fn resolve(common: &super::CommonArgs, file_config: Option<&ConfigFile>) -> Result<Self> {
        let key_path = common
            .key
            .as_deref()
            .map(expand_tilde)
            .or_else(|| file_config.and_then(|c| c.default_key()))
            .or_else(default_key_path);

        let hash_name = common
            .challenge
            .clone()
            .or_else(|| file_config.and_then(|c| c.default_hash()));
        let hash = match hash_name {
            Some(name) => name.parse::<ChallengeHash>().map_err(anyhow::Error::msg)?,
            None => ChallengeHash::default(),
        };

        Ok(Self {
            key_path,
            hash,
            quiet: common.quiet,
            json_output: common.output == super::OutputFormat::Json,
        })
    }

    /// Print human-readable progress lines
    pub fn verbose(&self) -> bool {
        !self.quiet && !self.json_output
    }

    pub fn require_key_path(&self) -> Result<&Path> {
        self.key_path
            .as_deref()
            .context("No key file configured. Use --key or set BABYJUB_KEY")
    }

    /// Load the private key from the configured path
    pub fn load_key(&self) -> Result<PrivateKey> {
        let path = self.require_key_path()?;
        read_key_file(path).with_context(|| format!("Failed to load key from {:?}", path))
    }

    /// Signer using the configured key and challenge hash
    pub fn signer(&self) -> Result<BabyJubSigner> {
        Ok(BabyJubSigner::new(
            self.load_key()?,
            SignerConfig::new().with_hash(self.hash),
        ))
    }
}

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    default: Option<DefaultConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct DefaultConfig {
    key: Option<String>,
    hash: Option<String>,
}

impl ConfigFile {
    fn load() -> Result<Self> {
        let path = config_file_path()?;
        if !path.exists() {
            anyhow::bail!("Config file not found");
        }
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: ConfigFile = toml::from_str(content)?;
        Ok(config)
    }

    fn default_key(&self) -> Option<PathBuf> {
        self.default
            .as_ref()
            .and_then(|d| d.key.as_deref())
            .map(expand_tilde)
    }

    fn default_hash(&self) -> Option<String> {
        self.default.as_ref().and_then(|d| d.hash.clone())
    }
}

/// Get config file path
fn config_file_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not find config directory")?;
    Ok(config_dir.join("babyjub").join("config.toml"))
}

/// Get default key path
fn default_key_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("babyjub").join("id.key"))
}

/// Expand ~ to home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommonArgs, OutputFormat};

    const FILE: &str = r#"
[default]
key = "/etc/babyjub/signer.key"
hash = "mimc7"
"#;

    #[test]
    fn test_file_values_used_without_flags() {
        let file = ConfigFile::parse(FILE).unwrap();
        let config = Config::resolve(&CommonArgs::default(), Some(&file)).unwrap();
        assert_eq!(
            config.key_path,
            Some(PathBuf::from("/etc/babyjub/signer.key"))
        );
        assert_eq!(config.hash, ChallengeHash::Mimc7);
        assert!(config.verbose());
    }

    #[test]
    fn test_flags_override_file() {
        let file = ConfigFile::parse(FILE).unwrap();
        let common = CommonArgs {
            key: Some("other.key".into()),
            challenge: Some("poseidon".into()),
            output: OutputFormat::Json,
            quiet: false,
        };
        let config = Config::resolve(&common, Some(&file)).unwrap();
        assert_eq!(config.key_path, Some(PathBuf::from("other.key")));
        assert_eq!(config.hash, ChallengeHash::Poseidon);
        assert!(config.json_output);
        assert!(!config.verbose());
    }

    #[test]
    fn test_defaults_and_bad_hash() {
        let config = Config::resolve(&CommonArgs::default(), None).unwrap();
        assert_eq!(config.hash, ChallengeHash::Poseidon);

        let common = CommonArgs {
            challenge: Some("sha256".into()),
            ..CommonArgs::default()
        };
        assert!(Config::resolve(&common, None).is_err());
        assert!(ConfigFile::parse("default = 3").is_err());
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/k.key"), home.join("k.key"));
        }
    }
}
