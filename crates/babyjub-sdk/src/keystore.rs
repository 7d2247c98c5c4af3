//! Private keys stored as hex text files

use crate::error::{Result, SdkError};
use babyjub_core::PrivateKey;
use std::fs;
use std::path::Path;

/// Read a key file holding 64 hex characters (optional `0x`, surrounding
/// whitespace ignored).
pub fn read_key_file(path: &Path) -> Result<PrivateKey> {
    let content = fs::read_to_string(path).map_err(|source| SdkError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    PrivateKey::from_hex(content.trim()).map_err(|source| SdkError::InvalidKeyFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a key file, creating parent directories. On Unix the file is made
/// readable by the owner only.
pub fn write_key_file(path: &Path, key: &PrivateKey) -> Result<()> {
    let write_err = |source| SdkError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, format!("{}\n", key.to_hex())).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    log::debug!("wrote key file {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys").join("id.key");
        let key = PrivateKey::new([9u8; 32]);

        write_key_file(&path, &key).unwrap();
        assert_eq!(read_key_file(&path).unwrap(), key);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_read_accepts_prefix_and_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("k");
        fs::write(&path, format!("  0x{}\n\n", "01".repeat(32))).unwrap();
        assert_eq!(read_key_file(&path).unwrap(), PrivateKey::new([1u8; 32]));
    }

    #[test]
    fn test_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            read_key_file(&missing),
            Err(SdkError::ReadFile { .. })
        ));

        let short = dir.path().join("short");
        fs::write(&short, "abcd").unwrap();
        assert!(matches!(
            read_key_file(&short),
            Err(SdkError::InvalidKeyFile { .. })
        ));
    }
}
