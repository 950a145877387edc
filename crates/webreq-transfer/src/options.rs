use crate::error::{Result, TransferError};

/// Size of the intermediate copy buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Bytes between two progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 128;

/// Configuration for a body transfer.
///
/// # Examples
///
/// ```
/// use webreq_transfer::TransferOptions;
///
/// let options = TransferOptions::default().progress_interval(4096);
/// assert_eq!(options.buffer_size, 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Size of the buffer each read/write cycle goes through.
    ///
    /// Default: 1024
    pub buffer_size: usize,

    /// Minimum number of bytes between two progress callbacks.
    ///
    /// Smaller values report more often at a small throughput cost.
    ///
    /// Default: 128
    pub progress_interval: u64,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            buffer_size:       DEFAULT_BUFFER_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl TransferOptions {
    #[must_use]
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    #[must_use]
    pub fn progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(TransferError::InvalidBufferSize);
        }
        if self.progress_interval == 0 {
            return Err(TransferError::InvalidInterval);
        }
        Ok(())
    }
}
