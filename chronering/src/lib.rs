//! # chronering
//!
//! Concurrent time-indexed ring buffer with nearest-timestamp lookup.
//!
//! chronering stores the most recent N timestamped samples of a value type
//! in a fixed-capacity circular buffer, overwriting the oldest sample once
//! capacity is reached, and answers "what was the value at or nearest to
//! time T" in O(log N) while writers keep appending. A conventional
//! blocking FIFO queue ships alongside for consumers that should wait for
//! data instead of polling.
//!
//! ## Key Properties
//!
//! - Bounded, predictable storage — one allocation at construction, no
//!   resizing, the oldest entries age out silently
//! - Logarithmic lookups via a split binary search over the two sorted
//!   runs of the wrapped array
//! - Readers-writer locking: lookups never block each other, pushes are
//!   serialized, no torn state is ever observable
//! - Expected conditions (`BufferEmpty`, `ItemTooOld`) are `Result`
//!   values, never panics
//!
//! ## Quick Start
//!
//! ```rust
//! use chronering::SearchRingBuffer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Keep the last hour of once-per-second samples.
//! let sensor = SearchRingBuffer::new(3600);
//!
//! // Writers push monotonically timestamped values (nanoseconds).
//! sensor.push(1_000_000_000, 21.5)?;
//! sensor.push(2_000_000_000, 21.7)?;
//! sensor.push(3_000_000_000, 21.6)?;
//!
//! // Readers ask for the value nearest a point in time.
//! let at_boot = sensor.read(0)?;              // clamps to the oldest
//! let recent = sensor.read(2_400_000_000)?;   // nearest is the 2s sample
//! assert_eq!(at_boot, 21.5);
//! assert_eq!(recent, 21.7);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`SearchRingBuffer`] — Thread-safe buffer handle; cheap to clone and
//!   share across writer and reader threads
//! - [`BlockingQueue`] — Mutex/condvar FIFO with a blocking pop
//! - [`RingCore`](ring::RingCore) — The unsynchronized storage and search
//!   core, usable directly in single-threaded code
//!
//! ## Modules
//!
//! For lower-level access, the individual modules are also public:
//!
//! - [`buffer`] — Thread-safe ring buffer wrapper
//! - [`ring`] — Storage layout, cursors, and the split binary search
//! - [`queue`] — Blocking FIFO queue
//! - [`error`] — Error types

pub mod buffer;
pub mod error;
pub mod queue;
pub mod ring;

// Re-export primary API types at crate root for convenience.
pub use buffer::SearchRingBuffer;
pub use error::{ChroneringError, PushError, ReadError, Result};
pub use queue::BlockingQueue;
