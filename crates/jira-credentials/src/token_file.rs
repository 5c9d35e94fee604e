//! Fallback token file used when the OS secret store is unreachable.
//!
//! The file is a JSON object mapping host to token. Saving merges into the
//! existing map, so tokens for other hosts survive.

use crate::error::{Error, Result};
use crate::private_fs::{create_private_dir, write_private_file};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the fallback token file inside the config directory.
pub const TOKEN_FILE_NAME: &str = "token";

type TokenMap = BTreeMap<String, String>;

/// Handle on the fallback token file.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Create a handle for the file at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store `token` for `host`, keeping entries for every other host.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenFileParse`] if an existing file is not a valid
    /// host-to-token map (it is left untouched rather than overwritten),
    /// [`Error::TokenFileRead`] or [`Error::TokenFileWrite`] on I/O failure.
    pub fn save(&self, host: &str, token: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            create_private_dir(dir).map_err(|source| Error::TokenFileWrite {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let mut tokens = self.read_map()?.unwrap_or_default();
        tokens.insert(host.to_string(), token.to_string());

        let data = serde_json::to_vec_pretty(&tokens).map_err(|e| Error::TokenFileWrite {
            path: self.path.clone(),
            source: io::Error::other(e),
        })?;
        write_private_file(&self.path, &data).map_err(|source| Error::TokenFileWrite {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), host, hosts = tokens.len(), "Saved token to fallback file");
        Ok(())
    }

    /// Look up the token stored for `host`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenNotFound`] when the file does not exist or has no
    /// entry for `host`, [`Error::TokenFileRead`] / [`Error::TokenFileParse`]
    /// when the file cannot be read or decoded.
    pub fn load(&self, host: &str) -> Result<String> {
        let not_found = || Error::TokenNotFound {
            host: host.to_string(),
        };

        let mut tokens = self.read_map()?.ok_or_else(not_found)?;
        tokens.remove(host).ok_or_else(not_found)
    }

    /// Read the whole map, or `None` if the file does not exist.
    fn read_map(&self) -> Result<Option<TokenMap>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::TokenFileRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|source| Error::TokenFileParse {
                path: self.path.clone(),
                source,
            })
    }
}
