//! Shared, reloadable dataset handle for the server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};

use super::error::LoadError;
use super::store::DatasetStore;

/// Where the two dataset documents live on disk.
#[derive(Debug, Clone)]
pub struct DatasetFiles {
    pub stations: PathBuf,
    pub departures: PathBuf,
}

impl DatasetFiles {
    pub fn new(stations: impl Into<PathBuf>, departures: impl Into<PathBuf>) -> Self {
        Self {
            stations: stations.into(),
            departures: departures.into(),
        }
    }
}

/// Thread-safe dataset handle with support for background reload.
///
/// Readers take a short read lock per request. A reload parses the new
/// documents without holding the lock and only swaps on success.
#[derive(Clone)]
pub struct SharedDataset {
    inner: Arc<RwLock<DatasetStore>>,
    files: DatasetFiles,
}

impl SharedDataset {
    /// Load the dataset from disk.
    ///
    /// Fails if either file is missing or invalid.
    pub async fn open(files: DatasetFiles) -> Result<Self, LoadError> {
        let store = read_store(&files).await?;
        Ok(Self::from_store(store, files))
    }

    /// Wrap an already-built store.
    pub fn from_store(store: DatasetStore, files: DatasetFiles) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
            files,
        }
    }

    /// Borrow the current tables.
    pub async fn read(&self) -> RwLockReadGuard<'_, DatasetStore> {
        self.inner.read().await
    }

    /// Re-read the dataset files.
    ///
    /// On success, replaces the current tables and returns the new station
    /// count. On failure, the existing tables are preserved and the error is
    /// returned.
    pub async fn reload(&self) -> Result<usize, LoadError> {
        let store = read_store(&self.files).await?;
        let count = store.station_count();

        let mut guard = self.inner.write().await;
        *guard = store;

        Ok(count)
    }

}

async fn read_store(files: &DatasetFiles) -> Result<DatasetStore, LoadError> {
    let stations = read_file(&files.stations).await?;
    let departures = read_file(&files.departures).await?;
    DatasetStore::from_slices(&stations, &departures)
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}
