//! Dense node and edge handles.
//!
//! Handles are plain `u32` indices into the store's tables. They are issued in
//! increasing order and retired (never reused) when the node or edge is removed.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A handle type backed by a dense index.
///
/// Implemented by [`NodeId`], [`EdgeId`] and `usize`, so an
/// [`IdentifierSpace`](crate::collections::IdentifierSpace) can hand out any of them.
pub trait DenseHandle: Copy + Eq + fmt::Debug {
    /// Builds a handle from its index.
    fn from_index(index: usize) -> Self;

    /// Returns the underlying index.
    fn index(self) -> usize;
}

impl DenseHandle for usize {
    #[inline(always)]
    fn from_index(index: usize) -> Self {
        index
    }

    #[inline(always)]
    fn index(self) -> usize {
        self
    }
}

macro_rules! dense_handle {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw index.
            #[inline(always)]
            pub fn new(index: usize) -> Self {
                debug_assert!(
                    u32::try_from(index).is_ok(),
                    "handle index overflow: too many slots allocated"
                );
                #[allow(clippy::cast_possible_truncation)]
                Self(index as u32)
            }

            /// Returns the underlying index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl DenseHandle for $name {
            #[inline(always)]
            fn from_index(index: usize) -> Self {
                Self::new(index)
            }

            #[inline(always)]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

dense_handle!(
    /// Handle of a node in a [`GraphStore`](crate::graph::GraphStore).
    NodeId,
    "n"
);

dense_handle!(
    /// Handle of an edge in a [`GraphStore`](crate::graph::GraphStore).
    EdgeId,
    "e"
);
