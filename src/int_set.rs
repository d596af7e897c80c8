//! Ordered set of distinct integers backed by one contiguous buffer.
//!
//! This module provides [`IntSet`], a mutable value-type collection of
//! distinct `i32` values that remembers the order in which its current
//! members joined.
//!
//! # Overview
//!
//! - Members are stored contiguously, earliest-joined first
//! - Removing a member closes the gap, so the remaining members keep their
//!   relative order
//! - Re-adding a removed value appends it at the end; no memory of prior
//!   membership is kept
//! - Storage grows geometrically and never shrinks implicitly
//!
//! Sets with a capacity of at most [`DEFAULT_CAPACITY`] are kept inline and
//! do not touch the heap.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity   |
//! |----------------|--------------|
//! | `len`          | O(1)         |
//! | `is_empty`     | O(1)         |
//! | `contains`     | O(n)         |
//! | `add`          | O(n)         |
//! | `remove`       | O(n)         |
//! | `reset`        | O(1)         |
//! | `is_subset_of` | O(n * m)     |
//! | `==`           | O(n * m)     |
//! | `union_with`   | O(m * (n + m)) |
//! | `intersect`    | O(n * (n + m)) |
//! | `subtract`     | O(n * m)     |
//!
//! # Examples
//!
//! ```rust
//! use intset::IntSet;
//!
//! let mut set = IntSet::new();
//! assert!(set.add(5));
//! assert!(set.add(3));
//! assert!(set.add(9));
//! assert!(!set.add(3)); // already present
//! assert_eq!(set.to_string(), "5  3  9");
//!
//! set.remove(3);
//! set.add(3); // rejoins at the end
//! assert_eq!(set.to_string(), "5  9  3");
//! ```

use std::fmt;
use std::io;

use smallvec::SmallVec;

use crate::capacity::{DEFAULT_CAPACITY, effective_capacity, grown_capacity, initial_capacity};
use crate::error::{AllocationError, fail_allocation};

/// Buffer holding the members; inline up to the default capacity.
type Storage = SmallVec<[i32; DEFAULT_CAPACITY]>;

/// Text placed between two members by [`IntSet::dump`] and `Display`.
const DUMP_SEPARATOR: &str = "  ";

/// Allocates an empty buffer able to hold `capacity` members without
/// reallocating.
fn allocate(capacity: usize) -> Result<Storage, AllocationError> {
    let mut storage = Storage::new();
    storage
        .try_reserve_exact(capacity)
        .map_err(|error| AllocationError::from_collection(capacity, error))?;
    Ok(storage)
}

/// A set of distinct integers kept in membership order.
///
/// The set owns a single buffer of `capacity` slots, of which the first
/// `len()` hold the current members. Cloning deep-copies the buffer, so two
/// live sets never share storage.
///
/// Equality ignores both member order and capacity.
///
/// # Examples
///
/// ```rust
/// use intset::IntSet;
///
/// let first: IntSet = [1, 2, 3].into_iter().collect();
/// let second: IntSet = [3, 1, 2].into_iter().collect();
/// assert_eq!(first, second);
///
/// let union = first.union_with(&IntSet::from_iter([4]));
/// assert_eq!(union.to_string(), "1  2  3  4");
/// ```
pub struct IntSet {
    elements: Storage,
    capacity: usize,
}

impl IntSet {
    /// Creates an empty set with [`DEFAULT_CAPACITY`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::{DEFAULT_CAPACITY, IntSet};
    ///
    /// let set = IntSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), DEFAULT_CAPACITY);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty set able to hold `requested` members before growing.
    ///
    /// A request of zero is replaced by [`DEFAULT_CAPACITY`].
    ///
    /// Terminates the process if the storage cannot be allocated; use
    /// [`IntSet::try_with_capacity`] to observe the failure instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::{DEFAULT_CAPACITY, IntSet};
    ///
    /// assert_eq!(IntSet::with_capacity(3).capacity(), 3);
    /// assert_eq!(IntSet::with_capacity(0).capacity(), DEFAULT_CAPACITY);
    /// ```
    #[must_use]
    pub fn with_capacity(requested: usize) -> Self {
        Self::try_with_capacity(requested).unwrap_or_else(|error| fail_allocation(&error))
    }

    /// Creates an empty set like [`IntSet::with_capacity`], returning an
    /// error when the storage cannot be allocated.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] if the capacity overflows or the allocator
    /// fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::{AllocationErrorKind, IntSet};
    ///
    /// assert!(IntSet::try_with_capacity(100).is_ok());
    ///
    /// let error = IntSet::try_with_capacity(usize::MAX).unwrap_err();
    /// assert_eq!(error.kind, AllocationErrorKind::CapacityOverflow);
    /// ```
    pub fn try_with_capacity(requested: usize) -> Result<Self, AllocationError> {
        let capacity = initial_capacity(requested);
        let elements = allocate(capacity)?;
        Ok(Self { elements, capacity })
    }

    /// Replaces the contents of this set with a deep copy of `source`,
    /// including its capacity.
    ///
    /// The copy is built before the current storage is released.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let source: IntSet = [7, 8].into_iter().collect();
    /// let mut target: IntSet = [1, 2, 3].into_iter().collect();
    /// target.assign(&source);
    /// assert_eq!(target.to_string(), "7  8");
    /// ```
    pub fn assign(&mut self, source: &Self) {
        let replacement = source.clone();
        *self = replacement;
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns the number of members. Same as [`IntSet::len`].
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of members the set can hold before it must grow.
    ///
    /// This is the value chosen by the growth policy in
    /// [`capacity`](crate::capacity); the allocator may have reserved more.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `value` is a member.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let set: IntSet = [1, 2].into_iter().collect();
    /// assert!(set.contains(1));
    /// assert!(!set.contains(3));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        self.position(value).is_some()
    }

    /// Returns `true` if every member of this set is a member of `other`.
    ///
    /// The empty set is a subset of every set, including another empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let small: IntSet = [2, 3].into_iter().collect();
    /// let large: IntSet = [1, 2, 3].into_iter().collect();
    /// assert!(small.is_subset_of(&large));
    /// assert!(!large.is_subset_of(&small));
    /// assert!(IntSet::new().is_subset_of(&IntSet::new()));
    /// ```
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.elements.iter().all(|&element| other.contains(element))
    }

    /// Returns the members in membership order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.elements
    }

    /// Returns an iterator over the members in membership order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let set: IntSet = [3, 1, 2].into_iter().collect();
    /// let members: Vec<i32> = set.iter().copied().collect();
    /// assert_eq!(members, vec![3, 1, 2]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> IntSetIterator<'_> {
        IntSetIterator {
            inner: self.elements.iter(),
        }
    }

    /// Adds `value` as the most recently joined member.
    ///
    /// Returns `false` and leaves the set unchanged if `value` is already a
    /// member. Grows the storage first when it is full.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let mut set = IntSet::new();
    /// assert!(set.add(42));
    /// assert!(!set.add(42));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, value: i32) -> bool {
        if self.contains(value) {
            return false;
        }
        if self.len() == self.capacity {
            self.resize(grown_capacity(self.capacity));
        }
        self.elements.push(value);
        true
    }

    /// Removes `value`, shifting every later member one slot to the left.
    ///
    /// Returns `false` and leaves the set unchanged if `value` is not a
    /// member.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let mut set: IntSet = [5, 3, 9].into_iter().collect();
    /// assert!(set.remove(3));
    /// assert!(!set.remove(3));
    /// assert_eq!(set.to_string(), "5  9");
    /// ```
    pub fn remove(&mut self, value: i32) -> bool {
        match self.position(value) {
            Some(index) => {
                self.elements.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every member. The capacity is kept.
    #[inline]
    pub fn reset(&mut self) {
        self.elements.clear();
    }

    /// Returns a new set holding the members of this set followed by the
    /// members of `other` that are not already present, in `other`'s order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let left: IntSet = [1, 2, 3].into_iter().collect();
    /// let right: IntSet = [4, 2, 5].into_iter().collect();
    /// assert_eq!(left.union_with(&right).to_string(), "1  2  3  4  5");
    /// ```
    #[must_use]
    pub fn union_with(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for &element in other {
            result.add(element);
        }
        result
    }

    /// Returns a new set holding the members of this set that are also
    /// members of `other`, in this set's order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let left: IntSet = [1, 2, 3, 4].into_iter().collect();
    /// let right: IntSet = [4, 2, 9].into_iter().collect();
    /// assert_eq!(left.intersect(&right).to_string(), "2  4");
    /// ```
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for &element in self {
            if !other.contains(element) {
                result.remove(element);
            }
        }
        result
    }

    /// Returns a new set holding the members of this set that are not
    /// members of `other`, in this set's order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let left: IntSet = [1, 2, 3, 4].into_iter().collect();
    /// let right: IntSet = [4, 2, 9].into_iter().collect();
    /// assert_eq!(left.subtract(&right).to_string(), "1  3");
    /// ```
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for &element in other {
            result.remove(element);
        }
        result
    }

    /// Writes the members in membership order, separated by two spaces.
    ///
    /// Nothing is written for an empty set, and no trailing separator or
    /// newline is added.
    ///
    /// # Errors
    ///
    /// Returns any error produced by `sink`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intset::IntSet;
    ///
    /// let set: IntSet = [5, -3, 9].into_iter().collect();
    /// let mut output = Vec::new();
    /// set.dump(&mut output).unwrap();
    /// assert_eq!(output, b"5  -3  9");
    /// ```
    pub fn dump<W: io::Write>(&self, sink: &mut W) -> io::Result<()> {
        write!(sink, "{self}")
    }

    fn position(&self, value: i32) -> Option<usize> {
        self.elements.iter().position(|&element| element == value)
    }

    /// Moves the members into a fresh buffer sized by
    /// [`effective_capacity`]. Membership and order are unchanged.
    fn resize(&mut self, requested: usize) {
        let capacity = effective_capacity(requested, self.len());
        let mut storage = allocate(capacity).unwrap_or_else(|error| fail_allocation(&error));
        storage.extend_from_slice(&self.elements);
        log::trace!(
            "resized set storage from {} to {} slots ({} members)",
            self.capacity,
            capacity,
            storage.len()
        );
        self.elements = storage;
        self.capacity = capacity;
    }

    /// Checks the structural invariants. Used by tests after every mutation.
    #[cfg(test)]
    fn invariants_hold(&self) -> bool {
        let distinct = self
            .elements
            .iter()
            .enumerate()
            .all(|(index, element)| !self.elements[index + 1..].contains(element));
        distinct && self.len() <= self.capacity && self.capacity >= 1
    }
}

impl Default for IntSet {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for IntSet {
    fn clone(&self) -> Self {
        let mut elements = allocate(self.capacity).unwrap_or_else(|error| fail_allocation(&error));
        elements.extend_from_slice(&self.elements);
        Self {
            elements,
            capacity: self.capacity,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl PartialEq for IntSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset_of(other) && other.is_subset_of(self)
    }
}

impl Eq for IntSet {}

impl fmt::Debug for IntSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for IntSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut elements = self.iter();
        if let Some(first) = elements.next() {
            write!(formatter, "{first}")?;
            for element in elements {
                write!(formatter, "{DUMP_SEPARATOR}{element}")?;
            }
        }
        Ok(())
    }
}

impl FromIterator<i32> for IntSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<i32> for IntSet {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a> Extend<&'a i32> for IntSet {
    fn extend<I: IntoIterator<Item = &'a i32>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a> IntoIterator for &'a IntSet {
    type Item = &'a i32;
    type IntoIter = IntSetIterator<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for IntSet {
    type Item = i32;
    type IntoIter = IntSetIntoIterator;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntSetIntoIterator {
            inner: self.elements.into_iter(),
        }
    }
}

/// Iterator over references to the members of an [`IntSet`], in membership
/// order.
pub struct IntSetIterator<'a> {
    inner: std::slice::Iter<'a, i32>,
}

impl<'a> Iterator for IntSetIterator<'a> {
    type Item = &'a i32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for IntSetIterator<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for IntSetIterator<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Owning iterator over the members of an [`IntSet`], in membership order.
pub struct IntSetIntoIterator {
    inner: smallvec::IntoIter<[i32; DEFAULT_CAPACITY]>,
}

impl Iterator for IntSetIntoIterator {
    type Item = i32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntSetIntoIterator {}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for IntSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct IntSetVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for IntSetVisitor {
    type Value = IntSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of integers")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        // Duplicates in the input collapse onto their first occurrence.
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut set = IntSet::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for IntSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(IntSetVisitor)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set_of(elements: &[i32]) -> IntSet {
        let mut set = IntSet::new();
        set.extend(elements);
        set
    }

    #[rstest]
    fn test_new_uses_default_capacity() {
        let set = IntSet::new();
        assert_eq!(set.capacity(), DEFAULT_CAPACITY);
        assert!(set.invariants_hold());
    }

    #[rstest]
    fn test_add_grows_from_capacity_one() {
        let mut set = IntSet::with_capacity(1);
        let mut capacities = vec![set.capacity()];
        for value in [10, 20, 30, 40] {
            assert!(set.add(value));
            assert!(set.invariants_hold());
            capacities.push(set.capacity());
        }
        assert_eq!(capacities, vec![1, 1, 2, 4, 4]);
        assert_eq!(set.as_slice(), &[10, 20, 30, 40]);
    }

    #[rstest]
    fn test_add_beyond_inline_capacity_spills() {
        let mut set = IntSet::new();
        for value in 0..11 {
            set.add(value);
        }
        assert_eq!(set.capacity(), 16);
        assert!(set.elements.spilled());
        assert_eq!(set.as_slice(), (0..11).collect::<Vec<_>>().as_slice());
    }

    #[rstest]
    fn test_duplicate_add_does_not_grow() {
        let mut set = IntSet::with_capacity(1);
        set.add(1);
        assert!(!set.add(1));
        assert_eq!(set.capacity(), 1);
    }

    #[rstest]
    #[case::shrink_to_count(2, 5)]
    #[case::zero_request(0, 5)]
    #[case::exact(5, 5)]
    #[case::larger(40, 40)]
    fn test_resize_clamps_to_count(#[case] requested: usize, #[case] expected: usize) {
        let mut set = set_of(&[1, 2, 3, 4, 5]);
        set.resize(requested);
        assert_eq!(set.capacity(), expected);
        assert_eq!(set.as_slice(), &[1, 2, 3, 4, 5]);
        assert!(set.invariants_hold());
    }

    #[rstest]
    fn test_resize_empty_with_zero_uses_default() {
        let mut set = IntSet::with_capacity(3);
        set.resize(0);
        assert_eq!(set.capacity(), DEFAULT_CAPACITY);
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_reset_keeps_capacity() {
        let mut set = IntSet::with_capacity(1);
        set.extend([1, 2, 3]);
        let capacity = set.capacity();
        set.reset();
        assert!(set.is_empty());
        assert_eq!(set.capacity(), capacity);
        set.reset();
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_clone_copies_capacity_and_members() {
        let mut original = IntSet::with_capacity(3);
        original.extend([4, 5]);
        let copy = original.clone();
        assert_eq!(copy.capacity(), 3);
        assert_eq!(copy.as_slice(), &[4, 5]);
    }

    #[rstest]
    fn test_assign_takes_source_capacity() {
        let source = IntSet::with_capacity(25);
        let mut target = set_of(&[1, 2, 3]);
        target.assign(&source);
        assert!(target.is_empty());
        assert_eq!(target.capacity(), 25);
    }

    #[rstest]
    fn test_clone_from_matches_assign() {
        let source = set_of(&[9, 8, 7]);
        let mut target = IntSet::with_capacity(2);
        target.clone_from(&source);
        assert_eq!(target.as_slice(), source.as_slice());
        assert_eq!(target.capacity(), source.capacity());
    }

    #[rstest]
    fn test_assign_from_own_copy_is_unchanged() {
        let mut set = set_of(&[3, 1, 2]);
        let snapshot = set.clone();
        set.assign(&snapshot);
        assert_eq!(set.to_string(), "3  1  2");
        assert!(set.invariants_hold());
    }

    #[rstest]
    fn test_remove_shifts_later_members() {
        let mut set = set_of(&[1, 2, 3, 4]);
        assert!(set.remove(2));
        assert_eq!(set.as_slice(), &[1, 3, 4]);
        assert!(set.invariants_hold());
    }

    #[rstest]
    fn test_try_with_capacity_overflow() {
        let error = IntSet::try_with_capacity(usize::MAX).unwrap_err();
        assert_eq!(error.requested, usize::MAX);
        assert_eq!(
            error.kind,
            crate::error::AllocationErrorKind::CapacityOverflow
        );
    }

    #[rstest]
    fn test_derived_sets_keep_receiver_capacity() {
        let left = IntSet::with_capacity(30);
        let right = set_of(&[1]);
        assert_eq!(left.union_with(&right).capacity(), 30);
        assert_eq!(left.intersect(&right).capacity(), 30);
        assert_eq!(left.subtract(&right).capacity(), 30);
    }

    #[rstest]
    fn test_equality_ignores_capacity() {
        let mut small = IntSet::with_capacity(2);
        small.extend([1, 2]);
        let mut large = IntSet::with_capacity(50);
        large.extend([2, 1]);
        assert_eq!(small, large);
    }

    #[rstest]
    fn test_debug_format() {
        let set = set_of(&[5, 3, 9]);
        assert_eq!(format!("{set:?}"), "{5, 3, 9}");
    }

    #[rstest]
    fn test_display_empty_is_blank() {
        assert_eq!(IntSet::new().to_string(), "");
    }

    #[rstest]
    fn test_into_iter_owned_preserves_order() {
        let set = set_of(&[7, -1, 3]);
        let members: Vec<i32> = set.into_iter().collect();
        assert_eq!(members, vec![7, -1, 3]);
    }

    #[rstest]
    fn test_iter_is_double_ended() {
        let set = set_of(&[1, 2, 3]);
        let reversed: Vec<i32> = set.iter().rev().copied().collect();
        assert_eq!(reversed, vec![3, 2, 1]);
        assert_eq!(set.iter().len(), 3);
    }
}
