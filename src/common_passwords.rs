//! Common password list loading.
//!
//! The list is a newline-separated text file, optionally gzip-compressed. Entries
//! are trimmed and lowercased; blank lines are skipped.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::CommonPasswordsError;

/// Environment variable overriding the default list location.
pub const COMMON_PASSWORDS_PATH_ENV: &str = "PWD_COMMON_PASSWORDS_PATH";

const DEFAULT_PATH: &str = "./assets/common-passwords.txt.gz";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns the default common password list path.
///
/// Priority:
/// 1. Environment variable `PWD_COMMON_PASSWORDS_PATH`
/// 2. Default path `./assets/common-passwords.txt.gz`
pub fn default_password_list_path() -> PathBuf {
    std::env::var(COMMON_PASSWORDS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PATH))
}

/// Loads a common password list from `path`.
///
/// Gzip input is detected by its magic bytes, so the file name does not matter.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read or decompressed
///
/// A file with no entries yields an empty set.
pub fn load_password_list<P: AsRef<Path>>(path: P) -> Result<HashSet<String>, CommonPasswordsError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Common password list FAILED: FileNotFound {:?}", path);
        return Err(CommonPasswordsError::FileNotFound(path.to_path_buf()));
    }

    let raw = std::fs::read(path)?;
    let content = if raw.starts_with(&GZIP_MAGIC) {
        let mut text = String::new();
        GzDecoder::new(raw.as_slice()).read_to_string(&mut text)?;
        text
    } else {
        String::from_utf8(raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
    };

    let set = parse_password_list(&content);
    if set.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::warn!("Common password list is empty: {:?}", path);
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Common password list loaded: {} passwords from {:?}", set.len(), path);

    Ok(set)
}

fn parse_password_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect()
}
