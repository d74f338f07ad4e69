//! Configuration for the storage client used by the binding layer.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::impls::{InMemoryBlobClient, LocalBlobClient};
use crate::ports::BlobClient;

pub const BACKEND_ENV: &str = "TETHER_STORAGE_BACKEND";
pub const ROOT_ENV: &str = "TETHER_STORAGE_ROOT";

/// Available blob storage backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Memory,
    Local,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" | "inmemory" => Ok(StorageBackend::Memory),
            "local" | "fs" | "file" => Ok(StorageBackend::Local),
            _ => Err(format!("Unknown storage backend: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub backend: StorageBackend,
    /// Root directory for the `Local` backend.
    pub local_root: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            local_root: PathBuf::from("./blobs"),
        }
    }
}

impl HostConfig {
    /// Read the configuration from `TETHER_STORAGE_BACKEND` and `TETHER_STORAGE_ROOT`.
    ///
    /// Invalid values are logged and replaced with defaults.
    pub fn from_env() -> Self {
        Self::from_vars(env::var(BACKEND_ENV).ok(), env::var(ROOT_ENV).ok())
    }

    fn from_vars(backend: Option<String>, root: Option<String>) -> Self {
        let defaults = Self::default();

        let backend = match backend {
            Some(raw) => match raw.parse::<StorageBackend>() {
                Ok(backend) => {
                    info!("Using storage backend from environment: {:?}", backend);
                    backend
                }
                Err(e) => {
                    warn!("{e}. Using default {:?}.", defaults.backend);
                    defaults.backend
                }
            },
            None => defaults.backend,
        };

        let local_root = match root {
            Some(raw) if !raw.trim().is_empty() => PathBuf::from(raw),
            Some(_) => {
                warn!("{ROOT_ENV} is empty. Using default {}.", defaults.local_root.display());
                defaults.local_root
            }
            None => defaults.local_root,
        };

        Self { backend, local_root }
    }

    pub fn create_client(&self) -> Arc<dyn BlobClient> {
        match self.backend {
            StorageBackend::Memory => Arc::new(InMemoryBlobClient::new()),
            StorageBackend::Local => Arc::new(LocalBlobClient::new(self.local_root.clone())),
        }
    }
}
