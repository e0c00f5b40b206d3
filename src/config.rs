use crate::account::AccountStore;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the accounts file inside the config directory
pub const ACCOUNTS_FILE: &str = "accounts.json";

/// Failure to locate, read, parse, or write the accounts file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform reports no configuration directory
    #[error("cannot locate a configuration directory")]
    NoConfigDir,
    /// The accounts file could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// The I/O failure
        source: io::Error,
    },
    /// The accounts file could not be written
    #[error("cannot write {path}: {source}")]
    Write {
        /// File that failed
        path: PathBuf,
        /// The I/O failure
        source: io::Error,
    },
    /// The file exists but is not a valid accounts list
    #[error("{path} is not a valid accounts file: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// The parser's complaint
        source: serde_json::Error,
    },
}

/// Default accounts file location, `<config dir>/otpick/accounts.json`
pub fn default_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("otpick").join(ACCOUNTS_FILE))
}

/// Load the ordered account list from `path`.
///
/// The file is a JSON array, not an object, so the order accounts appear
/// in is the order the store keeps them in.
pub fn load(path: &Path) -> Result<AccountStore, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.into(),
        source,
    })?;
    parse(&text).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })
}

/// Parse accounts from JSON text
pub fn parse(text: &str) -> Result<AccountStore, serde_json::Error> {
    serde_json::from_str(text)
}

/// Write the account list back to `path`, creating parent directories
pub fn save(path: &Path, store: &AccountStore) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.into(),
            source,
        })?;
    }
    let mut text = serde_json::to_string_pretty(store).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    text.push('\n');
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.into(),
        source,
    })
}
