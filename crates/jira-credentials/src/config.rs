//! Persisted host configuration (`config.json`).

use crate::error::{Error, Result};
use crate::private_fs::{create_private_dir, write_private_file};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Contents of `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Default Jira host, e.g. `jira.example.com`.
    pub host: String,
}

impl HostConfig {
    /// Write the configuration to `path`, creating its directory if needed.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidHost);
        }

        if let Some(dir) = path.parent() {
            create_private_dir(dir).map_err(|source| Error::ConfigWrite {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let data = serde_json::to_vec_pretty(self).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: io::Error::other(e),
        })?;
        write_private_file(path, &data).map_err(|source| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), host = %self.host, "Saved host configuration");
        Ok(())
    }

    /// Read the configuration from `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_slice(&data).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
