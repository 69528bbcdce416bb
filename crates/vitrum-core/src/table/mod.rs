// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Generation-checked handle allocation and handle-indexed object storage.
//!
//! A handle is a single integer packing a slot `index` in its low bits and a
//! `generation` counter in its high bits. Freeing a slot bumps its generation,
//! so every handle still pointing at the old generation stops resolving.

mod allocator;
mod storage;

pub use allocator::{HandleAllocator, DEFAULT_MIN_FREE_INDICES};
pub use storage::Table;

use std::fmt;
use std::hash::Hash;

/// The bit layout of an integer handle type.
///
/// Implemented for `u32` (28 index bits, 4 generation bits) and `u64`
/// (48 index bits, 16 generation bits). Strongly typed ids created with
/// [`typed_handle!`](crate::typed_handle) forward to their inner type.
pub trait RawHandle: Copy + Eq + Hash + fmt::Debug {
    /// Number of low bits holding the slot index.
    const INDEX_BITS: u32;
    /// Number of high bits holding the generation counter.
    const GENERATION_BITS: u32;
    /// The largest representable slot index.
    const MAX_INDEX: u64 = (1u64 << Self::INDEX_BITS) - 1;
    /// The largest representable generation before it wraps back to zero.
    const MAX_GENERATION: u64 = (1u64 << Self::GENERATION_BITS) - 1;

    /// Rebuilds a handle from its packed integer value.
    fn from_raw(raw: u64) -> Self;

    /// Returns the packed integer value.
    fn into_raw(self) -> u64;

    /// Packs an index and a generation into a handle.
    fn pack(index: u64, generation: u64) -> Self {
        let index = index & Self::MAX_INDEX;
        let generation = generation & Self::MAX_GENERATION;
        Self::from_raw((generation << Self::INDEX_BITS) | index)
    }

    /// The slot index of this handle.
    fn index(self) -> usize {
        (self.into_raw() & Self::MAX_INDEX) as usize
    }

    /// The generation this handle was issued with.
    fn generation(self) -> u64 {
        (self.into_raw() >> Self::INDEX_BITS) & Self::MAX_GENERATION
    }
}

impl RawHandle for u32 {
    const INDEX_BITS: u32 = 28;
    const GENERATION_BITS: u32 = 4;

    fn from_raw(raw: u64) -> Self {
        raw as u32
    }

    fn into_raw(self) -> u64 {
        u64::from(self)
    }
}

impl RawHandle for u64 {
    const INDEX_BITS: u32 = 48;
    const GENERATION_BITS: u32 = 16;

    fn from_raw(raw: u64) -> Self {
        raw
    }

    fn into_raw(self) -> u64 {
        self
    }
}

/// Declares a strongly typed handle wrapping an integer [`RawHandle`].
///
/// ```
/// vitrum_core::typed_handle! {
///     /// A handle to a sound clip.
///     pub struct ClipId(u32);
/// }
/// ```
#[macro_export]
macro_rules! typed_handle {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($raw:ty);) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(pub $raw);

        impl $crate::table::RawHandle for $name {
            const INDEX_BITS: u32 = <$raw as $crate::table::RawHandle>::INDEX_BITS;
            const GENERATION_BITS: u32 = <$raw as $crate::table::RawHandle>::GENERATION_BITS;

            fn from_raw(raw: u64) -> Self {
                Self(<$raw as $crate::table::RawHandle>::from_raw(raw))
            }

            fn into_raw(self) -> u64 {
                <$raw as $crate::table::RawHandle>::into_raw(self.0)
            }
        }
    };
}

/// An error raised by a [`HandleAllocator`] or a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// The handle's slot was freed (or never allocated).
    InvalidHandle,
    /// Every representable slot index is in use.
    AllocationOverflow,
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleError::InvalidHandle => write!(f, "Handle does not refer to a live slot"),
            HandleError::AllocationOverflow => {
                write!(f, "Handle index space exhausted")
            }
        }
    }
}

impl std::error::Error for HandleError {}

#[cfg(test)]
mod tests;
