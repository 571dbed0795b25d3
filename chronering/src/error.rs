//! Error types for the chronering concurrent buffers.

use thiserror::Error;

/// The main error type for all chronering operations.
///
/// This enum covers the error conditions that can occur on the buffer's
/// write path (`push`) and read path (`read`). Out-of-range lookups are
/// not errors: they clamp to the nearest edge value instead.
#[derive(Error, Debug)]
pub enum ChroneringError {
    /// Error during a push operation (write path).
    #[error("push error: {0}")]
    Push(#[from] PushError),

    /// Error during a read operation (read path).
    #[error("read error: {0}")]
    Read(#[from] ReadError),
}

/// Errors that can occur when inserting into a ring buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushError {
    /// The supplied timestamp is strictly earlier than the newest entry.
    ///
    /// The push is rejected as a whole; the buffer is left untouched.
    /// Equal timestamps are accepted and ordered by insertion.
    #[error("item at {timestamp_ns} is older than the newest entry at {newest_ns}")]
    ItemTooOld {
        /// The rejected timestamp, in nanoseconds.
        timestamp_ns: u64,
        /// The timestamp of the current newest entry, in nanoseconds.
        newest_ns: u64,
    },
}

/// Errors that can occur when reading from a ring buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// The buffer has never received a push.
    ///
    /// Reads do not block waiting for data; callers either retry later or
    /// treat this as "no data yet".
    #[error("cannot read from an empty ring buffer")]
    BufferEmpty,
}

/// Type alias for `Result<T, ChroneringError>`.
pub type Result<T> = std::result::Result<T, ChroneringError>;
