use async_trait::async_trait;

use crate::domain::DataTable;

/// Port for parsing an uploaded file body into a table.
#[async_trait]
pub trait TableReader: Send + Sync {
    async fn read_table(&self, data: &[u8]) -> Result<DataTable, TableCodecError>;
}

/// Port for serializing a table into a downloadable file body.
#[async_trait]
pub trait TableWriter: Send + Sync {
    async fn write_table(&self, table: &DataTable) -> Result<Vec<u8>, TableCodecError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TableCodecError {
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("serialization failed: {0}")]
    WriteFailed(String),
}
