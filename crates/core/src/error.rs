#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write storage slot: {0}")]
    SlotWrite(std::io::Error),
    #[error("failed to remove storage slot: {0}")]
    SlotRemove(std::io::Error),
    #[error("failed to serialize records: {0}")]
    Serialization(serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
