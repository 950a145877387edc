use std::fmt;
use std::sync::Arc;

/// Snapshot handed to progress callbacks while a body is transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes written to the sink so far.
    pub bytes_transferred: u64,

    /// Declared length of the body, if the caller knew it up front.
    ///
    /// `None` means the length is unknown (for example a chunked upload of a
    /// reader with no size hint). Callbacks must handle this case.
    pub total_bytes: Option<u64>,
}

impl Progress {
    pub fn new(bytes_transferred: u64, total_bytes: Option<u64>) -> Self {
        Self {
            bytes_transferred,
            total_bytes,
        }
    }

    /// Calculate the percentage of completion.
    ///
    /// Returns `None` if `total_bytes` is unknown.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_transferred as f64 / total as f64) * 100.0
            }
        })
    }

    /// Returns `true` once the declared length has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_bytes
            .is_some_and(|total| self.bytes_transferred >= total)
    }
}

/// Callback invoked synchronously on the transferring thread.
pub type ProgressCallback = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Byte accounting shared by [`StreamTransferer`](crate::StreamTransferer)
/// and [`ProgressReader`](crate::ProgressReader).
///
/// A report fires whenever at least `interval` bytes have moved since the
/// previous report.
pub struct ProgressTracker {
    callback:      Option<ProgressCallback>,
    total_bytes:   Option<u64>,
    interval:      u64,
    transferred:   u64,
    last_reported: u64,
}

impl ProgressTracker {
    pub fn new(callback: Option<ProgressCallback>, total_bytes: Option<u64>, interval: u64) -> Self {
        Self {
            callback,
            total_bytes,
            interval: interval.max(1),
            transferred: 0,
            last_reported: 0,
        }
    }

    pub fn transferred(&self) -> u64 { self.transferred }

    pub fn total_bytes(&self) -> Option<u64> { self.total_bytes }

    /// Largest slice of `available` buffer space to use for one cycle.
    ///
    /// With a callback attached, cycles never exceed the interval so that
    /// every interval boundary gets its own report.
    pub fn cycle_len(&self, available: usize) -> usize {
        match self.callback {
            Some(_) => available.min(usize::try_from(self.interval).unwrap_or(usize::MAX)),
            None => available,
        }
    }

    pub fn advance(&mut self, bytes: u64) {
        self.transferred += bytes;
        if self.transferred - self.last_reported >= self.interval {
            self.report();
        }
    }

    /// Emit a last report if bytes moved since the previous one.
    pub fn finish(&mut self) {
        if self.transferred > self.last_reported {
            self.report();
        }
    }

    fn report(&mut self) {
        if let Some(callback) = &self.callback {
            callback(&Progress::new(self.transferred, self.total_bytes));
        }
        self.last_reported = self.transferred;
    }
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("callback", &self.callback.as_ref().map(|_| "{ ... }"))
            .field("total_bytes", &self.total_bytes)
            .field("interval", &self.interval)
            .field("transferred", &self.transferred)
            .field("last_reported", &self.last_reported)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording() -> (ProgressCallback, Arc<Mutex<Vec<Progress>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Arc::new(move |p: &Progress| sink.lock().unwrap().push(*p));
        (callback, seen)
    }

    #[test]
    fn test_percentage_unknown_total() {
        assert_eq!(Progress::new(10, None).percentage(), None);
        assert!(!Progress::new(10, None).is_complete());
    }

    #[test]
    fn test_percentage_known_total() {
        let progress = Progress::new(50, Some(200));
        assert_eq!(progress.percentage(), Some(25.0));
        assert!(Progress::new(200, Some(200)).is_complete());
        assert_eq!(Progress::new(0, Some(0)).percentage(), Some(100.0));
    }

    #[test]
    fn test_tracker_reports_on_interval() {
        let (callback, seen) = recording();
        let mut tracker = ProgressTracker::new(Some(callback), Some(300), 100);

        tracker.advance(60);
        tracker.advance(60);
        tracker.advance(60);
        tracker.advance(120);

        let seen = seen.lock().unwrap();
        let reported: Vec<u64> = seen.iter().map(|p| p.bytes_transferred).collect();
        assert_eq!(reported, vec![120, 300]);
        assert!(seen.iter().all(|p| p.total_bytes == Some(300)));
    }

    #[test]
    fn test_tracker_finish_reports_remainder_once() {
        let (callback, seen) = recording();
        let mut tracker = ProgressTracker::new(Some(callback), None, 128);

        tracker.advance(50);
        tracker.finish();
        tracker.finish();

        assert_eq!(*seen.lock().unwrap(), vec![Progress::new(50, None)]);
    }

    #[test]
    fn test_cycle_len_capped_only_with_callback() {
        let (callback, _) = recording();
        let tracker = ProgressTracker::new(Some(callback), None, 128);
        assert_eq!(tracker.cycle_len(1024), 128);
        assert_eq!(tracker.cycle_len(64), 64);

        let silent = ProgressTracker::new(None, None, 128);
        assert_eq!(silent.cycle_len(1024), 1024);
    }
}
