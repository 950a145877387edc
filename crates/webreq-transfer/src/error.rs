//! Error types for body transfer.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("transfer failed after {transferred} bytes: {source}")]
    Io {
        transferred: u64,
        #[source]
        source:      io::Error,
    },

    #[error("transfer cancelled after {transferred} bytes")]
    Cancelled { transferred: u64 },

    #[error("progress interval must be a positive number of bytes")]
    InvalidInterval,

    #[error("transfer buffer size must be positive")]
    InvalidBufferSize,
}

impl TransferError {
    pub(crate) fn io(transferred: u64, source: io::Error) -> Self {
        Self::Io {
            transferred,
            source,
        }
    }

    /// Bytes that reached the sink before the transfer stopped.
    pub fn transferred(&self) -> Option<u64> {
        match self {
            Self::Io { transferred, .. } | Self::Cancelled { transferred } => Some(*transferred),
            Self::InvalidInterval | Self::InvalidBufferSize => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;
