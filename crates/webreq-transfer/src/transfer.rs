use std::io::{self, Read, Write};

use tracing::debug;

use crate::cancel::CancelHandle;
use crate::error::{Result, TransferError};
use crate::options::TransferOptions;
use crate::progress::{ProgressCallback, ProgressTracker};

/// Copies a body source into a sink through a fixed-size buffer.
///
/// The transferer takes ownership of both ends. Whatever the outcome, source
/// and sink are dropped before [`transfer`](Self::transfer) returns, so file
/// handles and connection writers are released on error paths too. Nothing
/// is retried; a failed transfer is reported as [`TransferError::Io`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use webreq_transfer::{Progress, StreamTransferer, TransferOptions};
///
/// let mut sink = Vec::new();
/// let copied = StreamTransferer::new(TransferOptions::default())
///     .with_progress(Arc::new(|p: &Progress| println!("{} bytes", p.bytes_transferred)))
///     .with_total_bytes(Some(11))
///     .transfer(&b"hello world"[..], &mut sink)
///     .unwrap();
///
/// assert_eq!(copied, 11);
/// assert_eq!(sink, b"hello world");
/// ```
#[derive(Debug, Default)]
pub struct StreamTransferer {
    options:     TransferOptions,
    callback:    Option<CallbackSlot>,
    total_bytes: Option<u64>,
    cancel:      Option<CancelHandle>,
}

struct CallbackSlot(ProgressCallback);

impl std::fmt::Debug for CallbackSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str("{ ... }") }
}

impl StreamTransferer {
    pub fn new(options: TransferOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.callback = Some(CallbackSlot(callback));
        self
    }

    /// Declared length passed through to progress callbacks.
    #[must_use]
    pub fn with_total_bytes(mut self, total_bytes: Option<u64>) -> Self {
        self.total_bytes = total_bytes;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Move every byte of `source` into `sink` and return the byte count.
    ///
    /// Cancellation is checked before each buffer cycle. `Interrupted` reads
    /// are retried in place.
    pub fn transfer<R: Read, W: Write>(self, mut source: R, mut sink: W) -> Result<u64> {
        let Self {
            options,
            callback,
            total_bytes,
            cancel,
        } = self;
        options.validate()?;

        let mut tracker = ProgressTracker::new(
            callback.map(|slot| slot.0),
            total_bytes,
            options.progress_interval,
        );
        let mut buffer = vec![0u8; options.buffer_size];
        let cycle = tracker.cycle_len(buffer.len());

        debug!(?total_bytes, cycle, "starting body transfer");

        loop {
            if cancel.as_ref().is_some_and(CancelHandle::is_cancelled) {
                debug!(transferred = tracker.transferred(), "body transfer cancelled");
                return Err(TransferError::Cancelled {
                    transferred: tracker.transferred(),
                });
            }

            let read = match source.read(&mut buffer[..cycle]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransferError::io(tracker.transferred(), e)),
            };

            sink.write_all(&buffer[..read])
                .map_err(|e| TransferError::io(tracker.transferred(), e))?;
            tracker.advance(read as u64);
        }

        sink.flush()
            .map_err(|e| TransferError::io(tracker.transferred(), e))?;
        tracker.finish();

        debug!(transferred = tracker.transferred(), "body transfer complete");
        Ok(tracker.transferred())
    }
}
