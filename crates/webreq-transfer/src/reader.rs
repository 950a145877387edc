use std::io::{self, Read};

use crate::cancel::CancelHandle;
use crate::error::TransferError;
use crate::progress::ProgressTracker;

/// Reader adapter that reports progress as a third party pulls bytes.
///
/// Used when the copy loop belongs to someone else, such as an HTTP client
/// streaming a request entity. Accounting follows the same interval rule as
/// [`StreamTransferer`](crate::StreamTransferer), and a final report fires
/// at end of stream or once the declared total has been read.
#[derive(Debug)]
pub struct ProgressReader<R> {
    inner:   R,
    tracker: ProgressTracker,
    cancel:  Option<CancelHandle>,
}

impl<R> ProgressReader<R> {
    pub fn new(inner: R, tracker: ProgressTracker) -> Self {
        Self {
            inner,
            tracker,
            cancel: None,
        }
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn transferred(&self) -> u64 { self.tracker.transferred() }

    pub fn into_inner(self) -> R { self.inner }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.cancel.as_ref().is_some_and(CancelHandle::is_cancelled) {
            return Err(io::Error::other(TransferError::Cancelled {
                transferred: self.tracker.transferred(),
            }));
        }

        let len = self.tracker.cycle_len(buf.len());
        let n = self.inner.read(&mut buf[..len])?;
        if n == 0 {
            self.tracker.finish();
        } else {
            self.tracker.advance(n as u64);
            // Consumers of sized bodies may stop at the declared length
            // without probing for end of stream.
            if self.tracker.total_bytes() == Some(self.tracker.transferred()) {
                self.tracker.finish();
            }
        }
        Ok(n)
    }
}
