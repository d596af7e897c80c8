//! Storage-growth policy for [`IntSet`](crate::IntSet).
//!
//! The policy is expressed as pure functions over capacities so that it can
//! be tested independently of any buffer:
//!
//! - [`initial_capacity`]: capacity chosen at construction
//! - [`grown_capacity`]: capacity requested when an insertion finds the buffer full
//! - [`effective_capacity`]: capacity actually used when a resize is requested
//!
//! # Examples
//!
//! ```rust
//! use intset::capacity::{DEFAULT_CAPACITY, effective_capacity, grown_capacity};
//!
//! assert_eq!(grown_capacity(10), 16);
//! assert_eq!(effective_capacity(2, 5), 5);
//! assert_eq!(effective_capacity(0, 0), DEFAULT_CAPACITY);
//! ```

use static_assertions::const_assert;

/// Capacity used whenever a zero capacity is requested.
pub const DEFAULT_CAPACITY: usize = 10;

// Storage of size zero is never allocated.
const_assert!(DEFAULT_CAPACITY > 0);
const_assert!(grown_capacity(DEFAULT_CAPACITY) > DEFAULT_CAPACITY);

/// Returns the capacity a new set starts with.
///
/// A request of zero is replaced by [`DEFAULT_CAPACITY`].
///
/// # Examples
///
/// ```rust
/// use intset::capacity::{DEFAULT_CAPACITY, initial_capacity};
///
/// assert_eq!(initial_capacity(0), DEFAULT_CAPACITY);
/// assert_eq!(initial_capacity(3), 3);
/// ```
#[inline]
#[must_use]
pub const fn initial_capacity(requested: usize) -> usize {
    if requested == 0 {
        DEFAULT_CAPACITY
    } else {
        requested
    }
}

/// Returns the capacity requested when a full buffer must grow.
///
/// Computes `floor(1.5 * capacity) + 1` in integer arithmetic. The result is
/// always strictly greater than `capacity` unless the arithmetic saturates.
///
/// # Examples
///
/// ```rust
/// use intset::capacity::grown_capacity;
///
/// assert_eq!(grown_capacity(1), 2);
/// assert_eq!(grown_capacity(2), 4);
/// assert_eq!(grown_capacity(4), 7);
/// ```
#[inline]
#[must_use]
pub const fn grown_capacity(capacity: usize) -> usize {
    capacity.saturating_add(capacity / 2).saturating_add(1)
}

/// Returns the capacity a resize actually allocates.
///
/// A request too small to hold `count` elements is clamped up to exactly
/// `count`. When `count` is zero the clamp would yield an empty buffer, so
/// [`DEFAULT_CAPACITY`] is used instead.
///
/// # Arguments
///
/// * `requested` - The capacity asked for
/// * `count` - The number of elements the buffer must keep
///
/// # Examples
///
/// ```rust
/// use intset::capacity::{DEFAULT_CAPACITY, effective_capacity};
///
/// // Too small for the current members: clamped to exactly what is needed.
/// assert_eq!(effective_capacity(3, 8), 8);
/// // Nothing to keep and nothing requested: the default is used.
/// assert_eq!(effective_capacity(0, 0), DEFAULT_CAPACITY);
/// // Large enough: used as given.
/// assert_eq!(effective_capacity(20, 8), 20);
/// ```
#[inline]
#[must_use]
pub const fn effective_capacity(requested: usize, count: usize) -> usize {
    if requested == 0 && count == 0 {
        DEFAULT_CAPACITY
    } else if requested < count {
        count
    } else {
        requested
    }
}
