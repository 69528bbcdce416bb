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

use super::{HandleAllocator, HandleError, RawHandle};

#[derive(Debug, Clone)]
struct Entry<H, V> {
    handle: H,
    value: V,
}

/// Stores values of type `V` addressed by generation-checked handles.
///
/// Values live in a dense vector indexed by the handle's slot index; the
/// storage only grows. Destroying an entry drops its value in place, which is
/// what releases any backend resource the value owns.
#[derive(Debug, Clone)]
pub struct Table<V, H: RawHandle = u32> {
    allocator: HandleAllocator<H>,
    entries: Vec<Option<Entry<H, V>>>,
}

impl<V, H: RawHandle> Default for Table<V, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, H: RawHandle> Table<V, H> {
    /// Creates an empty table with the default allocator quarantine.
    pub fn new() -> Self {
        Self::with_allocator(HandleAllocator::new())
    }

    /// Creates an empty table around a preconfigured allocator.
    pub fn with_allocator(allocator: HandleAllocator<H>) -> Self {
        Self {
            allocator,
            entries: Vec::new(),
        }
    }

    /// Stores `value` and returns the handle addressing it.
    pub fn create(&mut self, value: V) -> Result<H, HandleError> {
        let handle = self.allocator.alloc()?;
        let index = handle.index();
        if index >= self.entries.len() {
            self.entries.resize_with(index + 1, || None);
        }
        self.entries[index] = Some(Entry { handle, value });
        Ok(handle)
    }

    /// Drops the value addressed by `handle` and frees the handle.
    ///
    /// Does nothing if the handle is stale.
    pub fn destroy(&mut self, handle: H) {
        let _ = self.remove(handle);
    }

    /// Moves the value out of the table and frees its handle.
    pub fn remove(&mut self, handle: H) -> Result<V, HandleError> {
        if !self.allocator.exists(handle) {
            return Err(HandleError::InvalidHandle);
        }
        let entry = self.entries[handle.index()]
            .take()
            .ok_or(HandleError::InvalidHandle)?;
        self.allocator.free(handle);
        Ok(entry.value)
    }

    /// Returns `true` if `handle` addresses a live value.
    pub fn contains(&self, handle: H) -> bool {
        self.allocator.exists(handle)
    }

    /// Borrows the value addressed by `handle`.
    pub fn get(&self, handle: H) -> Result<&V, HandleError> {
        if !self.allocator.exists(handle) {
            return Err(HandleError::InvalidHandle);
        }
        self.entries
            .get(handle.index())
            .and_then(Option::as_ref)
            .map(|entry| &entry.value)
            .ok_or(HandleError::InvalidHandle)
    }

    /// Mutably borrows the value addressed by `handle`.
    pub fn get_mut(&mut self, handle: H) -> Result<&mut V, HandleError> {
        if !self.allocator.exists(handle) {
            return Err(HandleError::InvalidHandle);
        }
        self.entries
            .get_mut(handle.index())
            .and_then(Option::as_mut)
            .map(|entry| &mut entry.value)
            .ok_or(HandleError::InvalidHandle)
    }

    /// Replaces the value addressed by `handle`, dropping the previous one.
    pub fn set(&mut self, handle: H, value: V) -> Result<(), HandleError> {
        *self.get_mut(handle)? = value;
        Ok(())
    }

    /// Destroys every live entry.
    pub fn clear(&mut self) {
        for slot in self.entries.iter_mut() {
            if let Some(entry) = slot.take() {
                self.allocator.free(entry.handle);
            }
        }
        self.entries.clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` when no entry is alive.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Iterates over every live `(handle, value)` pair in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &V)> {
        self.entries
            .iter()
            .filter_map(|slot| slot.as_ref().map(|entry| (entry.handle, &entry.value)))
    }
}
