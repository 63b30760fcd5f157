//! IndexVec - A vector indexed by a specific type.
//!
//! The runtime juggles several id spaces that are all small integers under
//! the hood: pool ids, cell ids, magic string ids. [`IndexVec`] keeps them
//! apart at compile time.
//!
//! # Example
//!
//! ```
//! use ember_util::define_idx;
//! use ember_util::index_vec::{Idx, IndexVec};
//!
//! define_idx!(SlotId, u16);
//!
//! let mut slots: IndexVec<SlotId, &str> = IndexVec::new();
//! let id = slots.push("length");
//! assert_eq!(slots[id], "length");
//! assert_eq!(id.index(), 0);
//! ```

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use crate::error::{IndexVecError, IndexVecResult};

/// Trait for types that can be used as indices
///
/// The type must round-trip through `usize`. Implementations may panic in
/// `from_usize` when the value does not fit their representation.
pub trait Idx: Copy + Eq + PartialEq {
    /// Convert from usize to index type
    fn from_usize(idx: usize) -> Self;

    /// Convert index to usize for array indexing
    fn index(self) -> usize;

    /// Largest index representable by this type
    const MAX_INDEX: usize;
}

/// A vector indexed by a specific type
///
/// Same layout as `Vec<T>`; the index type is purely a compile-time tag.
#[derive(Clone, Debug)]
pub struct IndexVec<I, T> {
    raw: Vec<T>,
    _marker: PhantomData<fn(&I)>,
}

impl<I, T> IndexVec<I, T> {
    /// Create an empty IndexVec
    #[inline]
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Create an IndexVec with the specified capacity
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Wrap an existing vector
    #[inline]
    pub fn from_raw(raw: Vec<T>) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.raw.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.raw.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.raw
    }

    /// Reserve room for `additional` elements, reporting heap exhaustion
    /// instead of aborting
    #[inline]
    pub fn try_reserve(
        &mut self,
        additional: usize,
    ) -> Result<(), std::collections::TryReserveError> {
        self.raw.try_reserve(additional)
    }
}

impl<I: Idx, T> IndexVec<I, T> {
    /// The index the next `push` will return
    #[inline]
    pub fn next_index(&self) -> I {
        I::from_usize(self.raw.len())
    }

    #[inline]
    pub fn push(&mut self, value: T) -> I {
        let index = self.next_index();
        self.raw.push(value);
        index
    }

    /// Remove the last element
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.raw.pop()
    }

    /// Last element with its index
    #[inline]
    pub fn last(&self) -> Option<(I, &T)> {
        let len = self.raw.len();
        self.raw.last().map(|v| (I::from_usize(len - 1), v))
    }

    #[inline]
    pub fn get(&self, index: I) -> Option<&T> {
        self.raw.get(index.index())
    }

    #[inline]
    pub fn get_mut(&mut self, index: I) -> Option<&mut T> {
        self.raw.get_mut(index.index())
    }

    /// Bounds-checked access returning a descriptive error
    pub fn try_get(&self, index: I) -> IndexVecResult<&T> {
        self.raw.get(index.index()).ok_or(IndexVecError::OutOfBounds {
            index: index.index(),
            length: self.raw.len(),
        })
    }

    #[inline]
    pub fn iter_enumerated(&self) -> impl Iterator<Item = (I, &T)> {
        self.raw
            .iter()
            .enumerate()
            .map(|(i, v)| (I::from_usize(i), v))
    }

    #[inline]
    pub fn iter_enumerated_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> {
        self.raw
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (I::from_usize(i), v))
    }

    #[inline]
    pub fn indices(&self) -> impl Iterator<Item = I> {
        (0..self.raw.len()).map(I::from_usize)
    }

    /// First index whose element satisfies `pred`
    pub fn position<P>(&self, mut pred: P) -> Option<I>
    where
        P: FnMut(&T) -> bool,
    {
        self.raw.iter().position(|v| pred(v)).map(I::from_usize)
    }
}

impl<I: Idx, T> Index<I> for IndexVec<I, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: I) -> &T {
        &self.raw[index.index()]
    }
}

impl<I: Idx, T> IndexMut<I> for IndexVec<I, T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self.raw[index.index()]
    }
}

impl<I, T> Default for IndexVec<I, T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<I, T> FromIterator<T> for IndexVec<I, T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self::from_raw(iter.into_iter().collect())
    }
}

/// Define a newtype index over an unsigned integer
///
/// ```
/// ember_util::define_idx!(PoolId, u32);
/// ```
#[macro_export]
macro_rules! define_idx {
    ($name:ident, $repr:ty) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $repr);

        impl $crate::index_vec::Idx for $name {
            const MAX_INDEX: usize = <$repr>::MAX as usize;

            #[inline]
            fn from_usize(idx: usize) -> Self {
                assert!(
                    idx <= <$repr>::MAX as usize,
                    "Index {} exceeds {}::MAX",
                    idx,
                    stringify!($repr)
                );
                $name(idx as $repr)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}
