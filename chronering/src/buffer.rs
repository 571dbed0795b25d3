//! Thread-safe wrapper around the ring buffer core.
//!
//! [`SearchRingBuffer`] guards a [`RingCore`] with a readers-writer lock:
//! any number of lookups proceed concurrently while pushes are fully
//! serialized against each other and against lookups. Every public
//! operation acquires and releases the lock within its own scope, so no
//! lock is ever held across caller code and a reader can never observe a
//! torn entry or a half-advanced cursor.
//!
//! The buffer does not block waiting for data: reading an empty buffer
//! fails immediately with [`ReadError::BufferEmpty`]. Pair it with
//! [`BlockingQueue`](crate::queue::BlockingQueue) when consumers should
//! wait instead.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{PushError, ReadError};
use crate::ring::RingCore;

/// Concurrent time-indexed ring buffer with nearest-timestamp lookup.
///
/// Stores the most recent `capacity` timestamped entries and answers
/// "what was the value at or nearest to time T" in O(log capacity) while
/// writers keep appending.
///
/// Cloning produces another handle to the same buffer (the underlying
/// storage is shared, not copied), so a buffer can be handed to writer
/// and reader threads cheaply.
///
/// # Examples
///
/// ```rust
/// use chronering::SearchRingBuffer;
///
/// let buffer = SearchRingBuffer::new(3600);
/// buffer.push(1_000_000_000, 85.5).unwrap();
/// buffer.push(2_000_000_000, 86.0).unwrap();
///
/// // Nearest lookup: 1.4s resolves to the entry at 1s.
/// assert_eq!(buffer.read(1_400_000_000).unwrap(), 85.5);
/// ```
pub struct SearchRingBuffer<T> {
    inner: Arc<RwLock<RingCore<T>>>,
}

impl<T> Clone for SearchRingBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for SearchRingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.inner.read();
        f.debug_struct("SearchRingBuffer")
            .field("len", &ring.len())
            .field("capacity", &ring.capacity())
            .field("newest_timestamp", &ring.newest_timestamp())
            .field("oldest_timestamp", &ring.oldest_timestamp())
            .finish()
    }
}

impl<T> SearchRingBuffer<T> {
    /// Creates an empty buffer with a fixed capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RingCore::with_capacity(capacity))),
        }
    }

    /// Inserts an entry, overwriting the oldest entry if the buffer is
    /// full.
    ///
    /// Takes the lock in exclusive mode for the whole read-modify-write,
    /// so concurrent readers either see the buffer before this entry or
    /// after it, never in between.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::ItemTooOld`] if `timestamp_ns` is strictly
    /// earlier than the newest stored timestamp. The buffer is unchanged
    /// in that case.
    pub fn push(&self, timestamp_ns: u64, value: T) -> Result<(), PushError> {
        self.inner.write().push(timestamp_ns, value)
    }

    /// Returns whether the buffer has never received a push.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns whether `capacity` entries have been written.
    pub fn is_full(&self) -> bool {
        self.inner.read().is_full()
    }

    /// Returns the number of live entries, at most `capacity`.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns the fixed capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Returns the timestamp of the oldest live entry, or `None` if the
    /// buffer is empty.
    pub fn oldest_timestamp(&self) -> Option<u64> {
        self.inner.read().oldest_timestamp()
    }

    /// Returns the timestamp of the newest entry, or `None` if the buffer
    /// is empty.
    pub fn newest_timestamp(&self) -> Option<u64> {
        self.inner.read().newest_timestamp()
    }
}

impl<T: Clone> SearchRingBuffer<T> {
    /// Returns the value stored nearest in time to `timestamp_ns`.
    ///
    /// Requests earlier than the oldest stored timestamp return the oldest
    /// value; requests later than the newest return the newest value.
    /// In-range requests resolve by the split binary search: exact matches
    /// return the earliest-inserted duplicate, distance ties go to the
    /// later entry.
    ///
    /// Takes the lock in shared mode; lookups never block each other.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::BufferEmpty`] if no entry has ever been
    /// written.
    pub fn read(&self, timestamp_ns: u64) -> Result<T, ReadError> {
        let ring = self.inner.read();
        ring.nearest(timestamp_ns).map(|(_, value)| value.clone())
    }

    /// Copies out all live entries in chronological order under a single
    /// shared lock acquisition.
    pub fn snapshot(&self) -> Vec<(u64, T)> {
        let ring = self.inner.read();
        ring.iter().map(|(ts, value)| (ts, value.clone())).collect()
    }
}
