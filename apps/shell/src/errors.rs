#![allow(dead_code)]

use thiserror::Error;

/// Failures raised by a key-value storage backend.
///
/// `WriteDenied` doubles as the private-browsing signal: engines that refuse
/// persistent writes in a private session surface exactly this case, so the
/// detector treats it as classification input rather than a fault.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Write denied by storage backend")]
    WriteDenied,
}

/// Failures raised by the session manager.
///
/// Deserialization failure never appears here: a corrupt persisted session
/// is discarded inside `load()` and reported as "no session".
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure raised by the quota-allocation capability.
/// An explicit denial is the expected private-mode indicator.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Allocation denied")]
    Denied,
}
