// Adapters layer: concrete storage back ends for the stranding data source and report output.

pub mod http;
pub mod local;

pub use http::HttpStorage;
pub use local::LocalStorage;

use crate::core::Storage;
use crate::utils::error::Result;
use crate::utils::validation::is_http_source;

/// Storage picked at runtime from the shape of the configured data source.
#[derive(Debug, Clone)]
pub enum SourceStorage {
    Local(LocalStorage),
    Http(HttpStorage),
}

impl SourceStorage {
    /// `http(s)://` sources are fetched, anything else is read from disk
    /// relative to the working directory.
    pub fn for_source(data_source: &str) -> Self {
        if is_http_source(data_source) {
            SourceStorage::Http(HttpStorage::new())
        } else {
            SourceStorage::Local(LocalStorage::new(".".to_string()))
        }
    }
}

impl Storage for SourceStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        match self {
            SourceStorage::Local(storage) => storage.read_file(path).await,
            SourceStorage::Http(storage) => storage.read_file(path).await,
        }
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        match self {
            SourceStorage::Local(storage) => storage.write_file(path, data).await,
            SourceStorage::Http(storage) => storage.write_file(path, data).await,
        }
    }
}
