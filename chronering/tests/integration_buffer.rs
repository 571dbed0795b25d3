//! Integration tests for the concurrent ring buffer's public contract.

use chronering::error::{ChroneringError, PushError, ReadError};
use chronering::SearchRingBuffer;

const MINUTE: u64 = 60_000_000_000;

#[test]
fn test_basic_push_read_cycle() {
    let buffer = SearchRingBuffer::new(10);
    let base = 1_700_000_000_000_000_000u64;

    buffer.push(base, "hello").unwrap();
    buffer.push(base + MINUTE, "world").unwrap();
    buffer.push(base + 60 * MINUTE, "bye").unwrap();

    assert_eq!(buffer.read(base).unwrap(), "hello");
    assert_eq!(buffer.read(base + MINUTE).unwrap(), "world");
    assert_eq!(buffer.read(base + 60 * MINUTE).unwrap(), "bye");
}

#[test]
fn test_read_empty_buffer_errors() {
    let buffer: SearchRingBuffer<i32> = SearchRingBuffer::new(20);

    let err = buffer.read(1_700_000_000_000_000_000).unwrap_err();
    assert_eq!(err, ReadError::BufferEmpty);
    assert_eq!(err.to_string(), "cannot read from an empty ring buffer");
}

#[test]
fn test_single_entry_answers_everything() {
    let buffer = SearchRingBuffer::new(20);
    buffer.push(1000, 1).unwrap();

    assert_eq!(buffer.read(1000).unwrap(), 1);
    assert_eq!(buffer.read(0).unwrap(), 1);
    assert_eq!(buffer.read(u64::MAX).unwrap(), 1);
}

#[test]
fn test_out_of_range_reads_clamp() {
    let buffer = SearchRingBuffer::new(20);
    let base = 1_000 * MINUTE;
    buffer.push(base, 1).unwrap();
    buffer.push(base + MINUTE, 2).unwrap();
    buffer.push(base + 2 * MINUTE, 3).unwrap();

    // Too old: the oldest value, not an error.
    assert_eq!(buffer.read(base - MINUTE).unwrap(), 1);
    // Too new: the newest value, not an error.
    assert_eq!(buffer.read(base + 3 * MINUTE).unwrap(), 3);
}

#[test]
fn test_capacity_three_overwrite_scenario() {
    // Four pushes into a capacity-3 buffer discard the first entry.
    let buffer = SearchRingBuffer::new(3);
    let t0 = 500 * MINUTE;

    buffer.push(t0, 'a').unwrap();
    buffer.push(t0 + 1, 'b').unwrap();
    buffer.push(t0 + 2, 'c').unwrap();
    buffer.push(t0 + 3, 'd').unwrap();

    assert_eq!(buffer.oldest_timestamp(), Some(t0 + 1));
    // 'a' is discarded; its timestamp clamps to the oldest survivor.
    assert_eq!(buffer.read(t0).unwrap(), 'b');
    assert_eq!(buffer.read(t0 + 3).unwrap(), 'd');
}

#[test]
fn test_even_capacity_wrap_scenario() {
    // Nine strictly increasing entries through a capacity-6 buffer.
    let buffer = SearchRingBuffer::new(6);
    let base = 100 * MINUTE;

    for (i, v) in ('a'..='i').enumerate() {
        buffer.push(base + (i as u64 + 1) * MINUTE, v).unwrap();
    }

    // Live entries are 'd'..='i'. The 4th-from-last is exact.
    assert_eq!(buffer.read(base + 6 * MINUTE).unwrap(), 'f');
    assert_eq!(buffer.read(base + 4 * MINUTE).unwrap(), 'd');
    assert_eq!(buffer.read(base + 9 * MINUTE).unwrap(), 'i');
}

#[test]
fn test_odd_capacity_wrap_scenario() {
    let buffer = SearchRingBuffer::new(7);
    let base = 100 * MINUTE;

    for (i, v) in ('a'..='i').enumerate() {
        buffer.push(base + (i as u64 + 1) * MINUTE, v).unwrap();
    }

    assert_eq!(buffer.read(base + 3 * MINUTE).unwrap(), 'c');
    assert_eq!(buffer.read(base + 9 * MINUTE).unwrap(), 'i');
}

#[test]
fn test_full_but_not_wrapped() {
    let buffer = SearchRingBuffer::new(5);
    let base = 100 * MINUTE;
    for (i, v) in ['a', 'b', 'c', 'd', 'e'].into_iter().enumerate() {
        buffer.push(base + (i as u64) * MINUTE, v).unwrap();
    }

    assert!(buffer.is_full());
    assert_eq!(buffer.read(base).unwrap(), 'a');
    assert_eq!(buffer.read(base + 4 * MINUTE).unwrap(), 'e');
}

#[test]
fn test_nearest_between_stored_timestamps() {
    let buffer = SearchRingBuffer::new(50);
    let base = 100 * MINUTE;
    for (i, v) in ('a'..='j').enumerate() {
        buffer.push(base + (i as u64 + 1) * 10 * MINUTE, v).unwrap();
    }

    // 73 minutes: below (70, 'g') is 3 away, above (80, 'h') is 7 away.
    assert_eq!(buffer.read(base + 73 * MINUTE).unwrap(), 'g');
    // 78 minutes: above wins at 2 away.
    assert_eq!(buffer.read(base + 78 * MINUTE).unwrap(), 'h');
}

#[test]
fn test_equidistant_request_returns_later_entry() {
    let buffer = SearchRingBuffer::new(6);
    buffer.push(10 * MINUTE, 10).unwrap();
    buffer.push(20 * MINUTE, 20).unwrap();

    assert_eq!(buffer.read(15 * MINUTE).unwrap(), 20);
}

#[test]
fn test_duplicate_timestamps_return_earliest_inserted() {
    // Mirrors the closest-match scenario: two entries share a timestamp.
    let buffer = SearchRingBuffer::new(6);
    let base = 100 * MINUTE;
    buffer.push(base + MINUTE, 1).unwrap();
    buffer.push(base + MINUTE, 2).unwrap();
    buffer.push(base + 10 * MINUTE, 10).unwrap();
    buffer.push(base + 20 * MINUTE, 20).unwrap();
    buffer.push(base + 30 * MINUTE, 30).unwrap();
    buffer.push(base + 40 * MINUTE, 40).unwrap();

    // Exact duplicate lookup: earliest inserted wins.
    assert_eq!(buffer.read(base + MINUTE).unwrap(), 1);
    // Nearest-below a duplicate pair resolves to the latest of the pair.
    assert_eq!(buffer.read(base + 4 * MINUTE).unwrap(), 2);
    assert_eq!(buffer.read(base + 6 * MINUTE).unwrap(), 10);
    // Edges still clamp.
    assert_eq!(buffer.read(base - 5 * MINUTE).unwrap(), 1);
    assert_eq!(buffer.read(base + 300 * MINUTE).unwrap(), 40);
}

#[test]
fn test_stale_push_rejected_and_state_intact() {
    let buffer = SearchRingBuffer::new(3);
    let base = 100 * MINUTE;
    buffer.push(base, 'a').unwrap();
    buffer.push(base + 60 * MINUTE, 'b').unwrap();
    buffer.push(base + 120 * MINUTE, 'c').unwrap();
    buffer.push(base + 180 * MINUTE, 'd').unwrap();
    let before = buffer.snapshot();

    let err = buffer.push(base + 179 * MINUTE, 'e').unwrap_err();
    assert_eq!(
        err,
        PushError::ItemTooOld {
            timestamp_ns: base + 179 * MINUTE,
            newest_ns: base + 180 * MINUTE,
        }
    );

    // Cursor positions and every slot are untouched after the rejection.
    assert_eq!(buffer.snapshot(), before);
    assert_eq!(buffer.read(base + 240 * MINUTE).unwrap(), 'd');
}

#[test]
fn test_discarded_values_never_resurface() {
    let buffer = SearchRingBuffer::new(8);
    for i in 0..100u64 {
        buffer.push(i * MINUTE, i).unwrap();
    }

    // Only the last 8 values remain reachable, whatever we ask for.
    for probe in 0..100u64 {
        let value = buffer.read(probe * MINUTE).unwrap();
        assert!(value >= 92, "read returned discarded value {value}");
    }
}

#[test]
fn test_string_values() {
    let buffer = SearchRingBuffer::new(10);
    buffer.push(10, "Hello".to_string()).unwrap();
    buffer.push(20, "world".to_string()).unwrap();

    assert_eq!(buffer.read(10).unwrap(), "Hello");
    assert_eq!(buffer.read(20).unwrap(), "world");
}

#[test]
fn test_error_conversions() {
    let err: ChroneringError = ReadError::BufferEmpty.into();
    assert!(matches!(err, ChroneringError::Read(ReadError::BufferEmpty)));
    assert_eq!(
        err.to_string(),
        "read error: cannot read from an empty ring buffer"
    );

    let err: ChroneringError = PushError::ItemTooOld {
        timestamp_ns: 5,
        newest_ns: 9,
    }
    .into();
    assert_eq!(
        err.to_string(),
        "push error: item at 5 is older than the newest entry at 9"
    );
}
