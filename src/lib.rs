//! # intset
//!
//! A finite set of distinct integers backed by a single contiguous,
//! dynamically resized buffer.
//!
//! ## Overview
//!
//! - [`IntSet`]: the set itself. Members keep the order in which they most
//!   recently joined; removing a member closes the gap without disturbing
//!   the others.
//! - [`capacity`]: the storage-growth policy (default capacity, geometric
//!   growth, resize clamping).
//! - [`AllocationError`]: the only failure the crate knows about. Outside of
//!   [`IntSet::try_with_capacity`] it is fatal.
//!
//! Set algebra (`union_with`, `intersect`, `subtract`) always returns a new,
//! independently owned set and leaves both operands untouched.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`IntSet`] as a sequence
//!
//! ## Example
//!
//! ```rust
//! use intset::prelude::*;
//!
//! let mut set = IntSet::new();
//! set.add(5);
//! set.add(3);
//! set.add(9);
//! assert_eq!(set.size(), 3);
//! assert_eq!(set.to_string(), "5  3  9");
//!
//! let other: IntSet = [3, 4].into_iter().collect();
//! assert_eq!(set.intersect(&other).to_string(), "3");
//! assert!(set.subtract(&other).intersect(&other).is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use intset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::capacity::DEFAULT_CAPACITY;
    pub use crate::error::{AllocationError, AllocationErrorKind};
    pub use crate::int_set::{IntSet, IntSetIntoIterator, IntSetIterator};
}

pub mod capacity;
pub mod error;
mod int_set;

pub use capacity::DEFAULT_CAPACITY;
pub use error::{AllocationError, AllocationErrorKind};
pub use int_set::{IntSet, IntSetIntoIterator, IntSetIterator};
