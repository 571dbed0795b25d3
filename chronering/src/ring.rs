//! Core ring buffer storage and nearest-timestamp lookup.
//!
//! This module provides the unsynchronized ring buffer core. It implements
//! circular buffer semantics over a fixed-capacity slot array together with
//! a split binary search that resolves a requested timestamp to the nearest
//! stored entry.
//!
//! # Key Features
//!
//! - Fixed-capacity storage allocated once, never resized
//! - Index-based cursors with modular arithmetic (no iterator invalidation)
//! - O(log capacity) nearest-timestamp lookup
//! - Chronological iteration across the wrap boundary
//!
//! # Design
//!
//! Entries are `(timestamp_ns, value)` pairs kept in insertion order, which
//! is also non-decreasing timestamp order. Physically the slot array holds
//! at most two sorted runs split at the `newest` cursor:
//!
//! ```text
//!  <---run A---><-----run B----->
//!  | 8 | 9 | 10 | 4 | 5 | 6 | 7 |
//!            ^newest
//! ```
//!
//! Run A spans the physical start through `newest`; run B spans the slot
//! after `newest` through the physical end and is empty until the buffer
//! has wrapped. A lookup decides which run holds the requested timestamp
//! with a single comparison against the physical boundary entries, then
//! binary-searches only within that run.

use crate::error::{PushError, ReadError};

/// Unsynchronized time-indexed ring buffer core.
///
/// Stores the most recent `capacity` timestamped entries, overwriting the
/// oldest entry once capacity is reached. Pushed timestamps must be
/// non-decreasing; lookups resolve to the stored entry nearest in time.
///
/// # Thread Safety
///
/// `RingCore` requires `&mut self` for writes and performs no internal
/// locking. [`SearchRingBuffer`](crate::buffer::SearchRingBuffer) wraps it
/// in a readers-writer lock for shared use.
#[derive(Debug)]
pub struct RingCore<T> {
    /// Entry slots. Grows with pushes until it reaches `capacity`, after
    /// which entries are overwritten in place.
    slots: Vec<(u64, T)>,
    /// Fixed slot budget; `slots.len()` never exceeds this.
    capacity: usize,
    /// Index of the most recently written slot.
    newest: usize,
    /// Index of the least recently written slot still present. Stays at 0
    /// until the buffer is full.
    oldest: usize,
    /// Set once `capacity` entries have been written.
    full: bool,
}

impl<T> RingCore<T> {
    /// Creates an empty ring buffer with a fixed capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chronering::ring::RingCore;
    ///
    /// let ring: RingCore<f64> = RingCore::with_capacity(3600);
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.capacity(), 3600);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be non-zero");
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            newest: 0,
            oldest: 0,
            full: false,
        }
    }

    /// Returns the fixed capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live entries, at most `capacity`.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns whether the buffer has never received a push.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns whether `capacity` entries have been written.
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Returns the timestamp of the newest entry, or `None` if the buffer
    /// is empty.
    pub fn newest_timestamp(&self) -> Option<u64> {
        self.slots.get(self.newest).map(|&(ts, _)| ts)
    }

    /// Returns the timestamp of the oldest live entry, or `None` if the
    /// buffer is empty.
    ///
    /// This is the entry that will be overwritten next once the buffer is
    /// full.
    pub fn oldest_timestamp(&self) -> Option<u64> {
        self.slots.get(self.oldest).map(|&(ts, _)| ts)
    }

    /// Inserts an entry, overwriting the oldest entry if the buffer is
    /// full.
    ///
    /// Timestamps must be non-decreasing across pushes: a timestamp equal
    /// to the current newest is accepted (duplicates are ordered by
    /// insertion), a strictly earlier one is rejected without touching the
    /// buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::ItemTooOld`] if `timestamp_ns` is strictly
    /// earlier than the newest stored timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chronering::ring::RingCore;
    ///
    /// let mut ring = RingCore::with_capacity(3);
    /// ring.push(10, "a").unwrap();
    /// ring.push(20, "b").unwrap();
    ///
    /// // Going backwards in time is rejected.
    /// assert!(ring.push(15, "x").is_err());
    /// ```
    pub fn push(&mut self, timestamp_ns: u64, value: T) -> Result<(), PushError> {
        if let Some(newest_ns) = self.newest_timestamp() {
            if timestamp_ns < newest_ns {
                tracing::debug!(timestamp_ns, newest_ns, "rejecting out-of-order push");
                return Err(PushError::ItemTooOld {
                    timestamp_ns,
                    newest_ns,
                });
            }
        }

        if self.slots.len() < self.capacity {
            // Still filling: occupy the next unused slot.
            self.slots.push((timestamp_ns, value));
            self.newest = self.slots.len() - 1;
            if self.slots.len() == self.capacity {
                self.full = true;
            }
        } else {
            // Full: advance the cursor and overwrite in place. The
            // displaced entry is the oldest, so `oldest` follows.
            if self.newest == self.capacity - 1 {
                tracing::trace!(capacity = self.capacity, "write cursor wrapping");
            }
            self.newest = next_slot(self.newest, self.capacity);
            self.slots[self.newest] = (timestamp_ns, value);
            self.oldest = next_slot(self.newest, self.capacity);
        }

        Ok(())
    }

    /// Resolves the entry nearest in time to `timestamp_ns`.
    ///
    /// Requests earlier than the oldest stored timestamp clamp to the
    /// oldest entry; requests later than the newest clamp to the newest.
    /// In-range requests are resolved by the split binary search:
    ///
    /// - an exact timestamp match returns the earliest-inserted entry with
    ///   that timestamp;
    /// - otherwise the neighbors on either side are compared by absolute
    ///   time distance, the later entry winning an exact tie.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::BufferEmpty`] if no entry has ever been
    /// written.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chronering::ring::RingCore;
    ///
    /// let mut ring = RingCore::with_capacity(4);
    /// ring.push(10, "a").unwrap();
    /// ring.push(20, "b").unwrap();
    ///
    /// assert_eq!(ring.nearest(12).unwrap(), &(10, "a"));
    /// assert_eq!(ring.nearest(99).unwrap(), &(20, "b")); // clamps to newest
    /// ```
    pub fn nearest(&self, timestamp_ns: u64) -> Result<&(u64, T), ReadError> {
        if self.is_empty() {
            return Err(ReadError::BufferEmpty);
        }

        let oldest = &self.slots[self.oldest];
        if timestamp_ns < oldest.0 {
            return Ok(oldest);
        }
        let newest = &self.slots[self.newest];
        if timestamp_ns > newest.0 {
            return Ok(newest);
        }

        Ok(self.find_nearest(timestamp_ns))
    }

    /// Split binary search for an in-range timestamp.
    ///
    /// Caller guarantees `oldest.0 <= timestamp_ns <= newest.0`, so every
    /// indexing below stays in bounds.
    fn find_nearest(&self, timestamp_ns: u64) -> &(u64, T) {
        let slots = &self.slots;
        let first = &slots[0];
        let last = &slots[slots.len() - 1];

        let run = if timestamp_ns >= first.0 {
            // Run A: physical start through the newest entry.
            &slots[..=self.newest]
        } else if timestamp_ns <= last.0 {
            // Run B: the slot after newest through the physical end.
            // Non-empty here: run B only loses entries once the buffer is
            // full, and pre-fill every in-range request lands in run A.
            &slots[self.newest + 1..]
        } else {
            // The request falls in the gap between the two runs: later
            // than the physically-last entry, earlier than the
            // physically-first. Resolve by distance, ties favoring the
            // physically-first entry.
            let above_diff = first.0 - timestamp_ns;
            let below_diff = timestamp_ns - last.0;
            return if below_diff < above_diff { last } else { first };
        };

        // Lower bound: first entry whose timestamp is not less than the
        // request. The run's final timestamp is >= the request, so the
        // partition point is always a valid index.
        let above_idx = run.partition_point(|&(ts, _)| ts < timestamp_ns);
        let above = &run[above_idx];

        if above.0 == timestamp_ns {
            // Exact match. Lower-bound semantics make this the
            // earliest-inserted entry among duplicate timestamps.
            return above;
        }

        // Not exact, so the request is strictly greater than the run's
        // first timestamp and `above_idx > 0`.
        let below = &run[above_idx - 1];
        let above_diff = above.0 - timestamp_ns;
        let below_diff = timestamp_ns - below.0;
        if below_diff < above_diff { below } else { above }
    }

    /// Returns an iterator over live entries in chronological order
    /// (oldest to newest), crossing the wrap boundary transparently.
    pub fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            ring: self,
            current: self.oldest,
            remaining: self.slots.len(),
        }
    }
}

/// Advances a slot index by one, wrapping at `capacity`.
#[inline]
fn next_slot(index: usize, capacity: usize) -> usize {
    (index + 1) % capacity
}

/// Chronological iterator over the live entries of a [`RingCore`].
#[derive(Debug)]
pub struct RingIter<'a, T> {
    ring: &'a RingCore<T>,
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = (u64, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (ts, value) = &self.ring.slots[self.current];
        self.current = next_slot(self.current, self.ring.capacity);
        self.remaining -= 1;
        Some((*ts, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for RingIter<'a, T> {}

impl<'a, T> IntoIterator for &'a RingCore<T> {
    type Item = (u64, &'a T);
    type IntoIter = RingIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
