//! Blocking FIFO queue companion.
//!
//! [`BlockingQueue`] is a conventional mutex/condition-variable queue:
//! producers push without blocking, consumers either poll with
//! [`try_pop`](BlockingQueue::try_pop) or park in
//! [`wait_pop`](BlockingQueue::wait_pop) until data arrives. It is the
//! waiting counterpart to [`SearchRingBuffer`](crate::buffer::SearchRingBuffer),
//! whose reads fail immediately on an empty buffer.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct Shared<T> {
    queue: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

/// Unbounded multi-producer multi-consumer FIFO queue.
///
/// Cloning produces another handle to the same queue; entries pushed
/// through one handle are visible to all.
///
/// # Examples
///
/// ```rust
/// use chronering::BlockingQueue;
///
/// let queue = BlockingQueue::new();
/// queue.push("job");
/// assert_eq!(queue.try_pop(), Some("job"));
/// assert_eq!(queue.try_pop(), None);
/// ```
pub struct BlockingQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for BlockingQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingQueue")
            .field("len", &self.len())
            .finish()
    }
}

impl<T> BlockingQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(VecDeque::new()),
                not_empty: Condvar::new(),
            }),
        }
    }

    /// Appends an entry to the back of the queue. Never blocks.
    pub fn push(&self, value: T) {
        let mut queue = self.shared.queue.lock();
        queue.push_back(value);
        // Drop the lock before notifying so the woken thread does not
        // immediately block on it. One wakeup per entry: notifying only
        // on the empty-to-non-empty transition strands the second of two
        // waiters when pushes land back to back.
        drop(queue);
        self.shared.not_empty.notify_one();
    }

    /// Removes and returns the front entry, blocking until one exists.
    pub fn wait_pop(&self) -> T {
        let mut queue = self.shared.queue.lock();
        loop {
            if let Some(value) = queue.pop_front() {
                return value;
            }
            self.shared.not_empty.wait(&mut queue);
        }
    }

    /// Removes and returns the front entry, or `None` if the queue is
    /// empty. Never blocks beyond the lock itself.
    pub fn try_pop(&self) -> Option<T> {
        self.shared.queue.lock().pop_front()
    }

    /// Returns whether the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.shared.queue.lock().is_empty()
    }

    /// Returns the number of queued entries.
    pub fn len(&self) -> usize {
        self.shared.queue.lock().len()
    }
}
