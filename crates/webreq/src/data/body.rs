use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use webreq_transfer::ProgressCallback;

use crate::error::{Error, Result};

/// Single-use byte source for a request body.
///
/// Owns its reader until an emission moves it into a transfer. `length` is
/// `None` when the size is not known up front, in which case the connection
/// representation falls back to chunked transfer.
pub struct BodySource {
    reader:      Box<dyn Read + Send>,
    length:      Option<u64>,
    on_progress: Option<ProgressCallback>,
}

impl BodySource {
    pub fn from_reader<R: Read + Send + 'static>(reader: R, length: Option<u64>) -> Self {
        Self {
            reader: Box::new(reader),
            length,
            on_progress: None,
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let length = bytes.len() as u64;
        Self::from_reader(Cursor::new(bytes), Some(length))
    }

    /// Open `path` for reading; the declared length is the file size.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let missing = |source| Error::MissingBodySource {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(missing)?;
        let length = file.metadata().map_err(missing)?.len();
        Ok(Self::from_reader(file, Some(length)))
    }

    #[must_use]
    pub fn with_progress(mut self, on_progress: Option<ProgressCallback>) -> Self {
        self.on_progress = on_progress;
        self
    }

    pub fn length(&self) -> Option<u64> { self.length }

    pub fn has_progress(&self) -> bool { self.on_progress.is_some() }

    pub(crate) fn into_parts(self) -> (Box<dyn Read + Send>, Option<u64>, Option<ProgressCallback>) {
        (self.reader, self.length, self.on_progress)
    }
}

impl fmt::Debug for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodySource")
            .field("length", &self.length)
            .field("on_progress", &self.on_progress.as_ref().map(|_| "{ ... }"))
            .finish_non_exhaustive()
    }
}
