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

use super::{HandleError, RawHandle};
use std::collections::VecDeque;
use std::marker::PhantomData;

/// Number of freed indices held back before any of them is recycled.
pub const DEFAULT_MIN_FREE_INDICES: usize = 512;

/// Issues generation-checked handles and recycles their slots.
///
/// Freed indices go to the back of a FIFO and are only handed out again once
/// more than `min_free_indices` of them are waiting. Delaying reuse makes it
/// much less likely that a stale handle meets its slot again after the
/// generation counter wraps.
#[derive(Debug, Clone)]
pub struct HandleAllocator<H: RawHandle = u32> {
    /// Current generation of every slot ever created.
    generations: Vec<u16>,
    /// Recycled indices, oldest first.
    free_indices: VecDeque<usize>,
    min_free_indices: usize,
    _marker: PhantomData<fn() -> H>,
}

impl<H: RawHandle> Default for HandleAllocator<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: RawHandle> HandleAllocator<H> {
    /// Creates an empty allocator with the default quarantine size.
    pub fn new() -> Self {
        Self::with_min_free_indices(DEFAULT_MIN_FREE_INDICES)
    }

    /// Creates an empty allocator that recycles an index only once more than
    /// `min_free_indices` are waiting. Zero recycles immediately.
    pub fn with_min_free_indices(min_free_indices: usize) -> Self {
        Self {
            generations: Vec::new(),
            free_indices: VecDeque::new(),
            min_free_indices,
            _marker: PhantomData,
        }
    }

    /// Allocates a new handle.
    ///
    /// ## Returns
    ///
    /// The handle, or [`HandleError::AllocationOverflow`] when a fresh slot is
    /// needed and the index space of `H` is exhausted.
    pub fn alloc(&mut self) -> Result<H, HandleError> {
        if self.free_indices.len() > self.min_free_indices {
            if let Some(index) = self.free_indices.pop_front() {
                let generation = u64::from(self.generations[index]);
                return Ok(H::pack(index as u64, generation));
            }
        }

        let index = self.generations.len();
        if index as u64 > H::MAX_INDEX {
            return Err(HandleError::AllocationOverflow);
        }
        self.generations.push(0);
        Ok(H::pack(index as u64, 0))
    }

    /// Returns `true` if `handle` refers to a live slot at its current generation.
    pub fn exists(&self, handle: H) -> bool {
        self.generations
            .get(handle.index())
            .is_some_and(|&generation| u64::from(generation) == handle.generation())
    }

    /// Frees `handle`, invalidating every copy of it.
    ///
    /// Freeing a handle that does not exist does nothing, so double frees are
    /// harmless.
    pub fn free(&mut self, handle: H) {
        if !self.exists(handle) {
            return;
        }
        let index = handle.index();
        let next = (u64::from(self.generations[index]) + 1) & H::MAX_GENERATION;
        self.generations[index] = next as u16;
        self.free_indices.push_back(index);
    }

    /// Number of handles currently alive.
    pub fn live_count(&self) -> usize {
        self.generations.len() - self.free_indices.len()
    }

    /// Number of slots ever created, alive or free.
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }

    /// The quarantine size this allocator was built with.
    pub fn min_free_indices(&self) -> usize {
        self.min_free_indices
    }
}
