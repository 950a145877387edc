//! Bounded-buffer body transfer with progress reporting.
//!
//! Moves a request body from its source into a connection sink (or hands it
//! to an HTTP client as a reader) while periodically notifying a progress
//! callback.
//!
//! # Key Features
//!
//! - **Bounded memory**: one fixed-size buffer per transfer
//! - **Scoped release**: source and sink are owned by the transfer and dropped on every exit path
//! - **Unknown lengths**: `total_bytes` is `None` when the body size is not declared
//! - **Cancellation**: a shared [`CancelHandle`] is checked between buffer cycles
//!
//! # Example
//!
//! ```
//! use webreq_transfer::{StreamTransferer, TransferOptions};
//!
//! let mut out = Vec::new();
//! let n = StreamTransferer::new(TransferOptions::default())
//!     .transfer(&b"payload"[..], &mut out)
//!     .unwrap();
//! assert_eq!(n, 7);
//! ```

pub use self::cancel::CancelHandle;
pub use self::error::{Result, TransferError};
pub use self::options::{DEFAULT_BUFFER_SIZE, DEFAULT_PROGRESS_INTERVAL, TransferOptions};
pub use self::progress::{Progress, ProgressCallback, ProgressTracker};
pub use self::reader::ProgressReader;
pub use self::transfer::StreamTransferer;

mod cancel;
mod error;
mod options;
mod progress;
mod reader;
mod transfer;
