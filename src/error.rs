//! Allocation errors for [`IntSet`](crate::IntSet) storage.
//!
//! Storage reallocation is the only operation in this crate that can fail.
//! The fallible constructor [`IntSet::try_with_capacity`](crate::IntSet::try_with_capacity)
//! surfaces the failure as an [`AllocationError`]; every other operation treats
//! it as fatal: the failure is logged and the process terminates.

use std::alloc::Layout;

use smallvec::CollectionAllocErr;

/// The reason a storage allocation could not be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationErrorKind {
    /// The requested capacity does not fit in the address space.
    CapacityOverflow,
    /// The allocator returned no memory for the given layout.
    AllocatorFailure {
        /// The layout that was requested from the allocator.
        layout: Layout,
    },
}

/// Represents a failed attempt to allocate storage for a set.
///
/// # Examples
///
/// ```rust
/// use intset::{AllocationError, AllocationErrorKind};
///
/// let error = AllocationError {
///     requested: 42,
///     kind: AllocationErrorKind::CapacityOverflow,
/// };
/// assert_eq!(
///     format!("{}", error),
///     "failed to allocate storage for 42 elements: capacity overflow"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationError {
    /// The capacity, in elements, that was being allocated.
    pub requested: usize,
    /// Why the allocation failed.
    pub kind: AllocationErrorKind,
}

impl AllocationError {
    pub(crate) fn from_collection(requested: usize, error: CollectionAllocErr) -> Self {
        let kind = match error {
            CollectionAllocErr::CapacityOverflow => AllocationErrorKind::CapacityOverflow,
            CollectionAllocErr::AllocErr { layout } => {
                AllocationErrorKind::AllocatorFailure { layout }
            }
        };
        Self { requested, kind }
    }
}

impl std::fmt::Display for AllocationErrorKind {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityOverflow => write!(formatter, "capacity overflow"),
            Self::AllocatorFailure { layout } => write!(
                formatter,
                "allocator returned no memory for {} bytes",
                layout.size()
            ),
        }
    }
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "failed to allocate storage for {} elements: {}",
            self.requested, self.kind
        )
    }
}

impl std::error::Error for AllocationError {}

/// Reports an allocation failure and terminates the process.
///
/// There is no recoverable path once an in-place mutation needs storage it
/// cannot get, so the set is never left in a partially updated state.
#[cold]
pub(crate) fn fail_allocation(error: &AllocationError) -> ! {
    log::error!("{error}");
    match error.kind {
        AllocationErrorKind::AllocatorFailure { layout } => std::alloc::handle_alloc_error(layout),
        AllocationErrorKind::CapacityOverflow => std::process::abort(),
    }
}
