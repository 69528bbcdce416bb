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

use super::*;
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

// --- DUMMY TYPES FOR TESTING ---

/// A handle with room for four slots and four generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TinyHandle(u8);

impl RawHandle for TinyHandle {
    const INDEX_BITS: u32 = 2;
    const GENERATION_BITS: u32 = 2;

    fn from_raw(raw: u64) -> Self {
        TinyHandle(raw as u8)
    }

    fn into_raw(self) -> u64 {
        u64::from(self.0)
    }
}

crate::typed_handle! {
    struct WidgetId(u64);
}

/// Counts how many times it has been dropped.
struct DropProbe(Rc<Cell<usize>>);

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

// --- HANDLE PACKING ---

#[test]
fn test_u32_layout_packs_index_and_generation() {
    let handle = u32::pack(5, 3);
    assert_eq!(handle, (3 << 28) | 5);
    assert_eq!(handle.index(), 5);
    assert_eq!(handle.generation(), 3);
    assert_eq!(u32::MAX_INDEX, (1 << 28) - 1);
    assert_eq!(u32::MAX_GENERATION, 15);
}

#[test]
fn test_u64_layout_packs_index_and_generation() {
    let handle = u64::pack(1 << 40, 0xBEEF);
    assert_eq!(handle.index(), 1 << 40);
    assert_eq!(handle.generation(), 0xBEEF);
    assert_eq!(u64::MAX_GENERATION, u64::from(u16::MAX));
}

#[test]
fn test_typed_handle_forwards_layout() {
    let id = WidgetId::pack(7, 2);
    assert_eq!(id.index(), 7);
    assert_eq!(id.generation(), 2);
    assert_eq!(WidgetId::INDEX_BITS, 48);
}

// --- ALLOCATOR ---

#[test]
fn test_alloc_returns_unique_live_handles() {
    let mut allocator: HandleAllocator<u32> = HandleAllocator::new();
    let mut seen = HashSet::new();

    for _ in 0..1000 {
        let handle = allocator.alloc().unwrap();
        assert!(allocator.exists(handle));
        assert!(seen.insert(handle), "Handle {handle:#x} was issued twice");
    }
    assert_eq!(allocator.live_count(), 1000);
}

#[test]
fn test_freed_handle_is_stale_even_after_slot_reuse() {
    // --- 1. SETUP ---
    let mut allocator: HandleAllocator<u32> = HandleAllocator::with_min_free_indices(0);
    let first = allocator.alloc().unwrap();

    // --- 2. ACTION ---
    allocator.free(first);
    let second = allocator.alloc().unwrap();

    // --- 3. ASSERTIONS ---
    assert_eq!(second.index(), first.index(), "Slot should be recycled");
    assert_eq!(second.generation(), first.generation() + 1);
    assert!(!allocator.exists(first), "Old handle must not resolve");
    assert!(allocator.exists(second));
}

#[test]
fn test_double_free_is_a_no_op() {
    let mut allocator: HandleAllocator<u32> = HandleAllocator::with_min_free_indices(0);
    let handle = allocator.alloc().unwrap();

    allocator.free(handle);
    allocator.free(handle);

    // Only one generation bump and one queued index.
    let reused = allocator.alloc().unwrap();
    assert_eq!(reused.generation(), 1);
    let fresh = allocator.alloc().unwrap();
    assert_eq!(fresh.index(), 1, "The index must not have been queued twice");
}

#[test]
fn test_free_of_never_allocated_handle_is_ignored() {
    let mut allocator: HandleAllocator<u32> = HandleAllocator::new();
    allocator.free(u32::pack(42, 0));
    assert_eq!(allocator.capacity(), 0);
    assert!(!allocator.exists(u32::pack(42, 0)));
}

#[test]
fn test_quarantine_delays_reuse_until_free_list_exceeds_threshold() {
    // --- 1. SETUP ---
    let mut allocator: HandleAllocator<u32> = HandleAllocator::with_min_free_indices(2);
    let a = allocator.alloc().unwrap();
    let b = allocator.alloc().unwrap();
    let c = allocator.alloc().unwrap();

    // --- 2. ACTION ---
    // Two freed indices do not exceed the threshold.
    allocator.free(a);
    allocator.free(b);
    let d = allocator.alloc().unwrap();

    // --- 3. ASSERTIONS ---
    assert_eq!(d.index(), 3, "Fourth alloc must use a brand-new slot");

    // A third freed index pushes the list past the threshold; the oldest
    // index comes back first.
    allocator.free(c);
    let e = allocator.alloc().unwrap();
    assert_eq!(e.index(), a.index());
    assert_eq!(e.generation(), 1);
    let f = allocator.alloc().unwrap();
    assert_eq!(f.index(), 4, "Back at the threshold, no more reuse");
}

#[test]
fn test_default_quarantine_keeps_growing_before_reuse() {
    let mut allocator: HandleAllocator<u32> = HandleAllocator::new();
    let handles: Vec<u32> = (0..DEFAULT_MIN_FREE_INDICES)
        .map(|_| allocator.alloc().unwrap())
        .collect();
    for handle in &handles {
        allocator.free(*handle);
    }

    let next = allocator.alloc().unwrap();
    assert_eq!(next.index(), DEFAULT_MIN_FREE_INDICES);
}

#[test]
fn test_generation_wraps_at_layout_maximum() {
    let mut allocator: HandleAllocator<TinyHandle> = HandleAllocator::with_min_free_indices(0);
    let mut handle = allocator.alloc().unwrap();
    for _ in 0..=TinyHandle::MAX_GENERATION {
        allocator.free(handle);
        handle = allocator.alloc().unwrap();
    }
    assert_eq!(handle.index(), 0);
    assert_eq!(handle.generation(), 0, "Generation should wrap back to zero");
}

#[test]
fn test_alloc_reports_overflow_when_index_space_is_exhausted() {
    let mut allocator: HandleAllocator<TinyHandle> = HandleAllocator::new();
    for expected in 0..4 {
        assert_eq!(allocator.alloc().unwrap().index(), expected);
    }
    assert_eq!(allocator.alloc(), Err(HandleError::AllocationOverflow));
}

// --- TABLE ---

#[test]
fn test_table_round_trip() {
    let mut table: Table<&'static str> = Table::new();
    let hello = table.create("hello").unwrap();
    let world = table.create("world").unwrap();

    assert_eq!(table.get(hello), Ok(&"hello"));
    assert_eq!(table.get(world), Ok(&"world"));
    assert_eq!(table.len(), 2);

    table.set(hello, "bonjour").unwrap();
    assert_eq!(table.get(hello), Ok(&"bonjour"));
}

#[test]
fn test_table_get_after_destroy_is_invalid() {
    let mut table: Table<i32> = Table::new();
    let handle = table.create(7).unwrap();

    table.destroy(handle);

    assert_eq!(table.get(handle), Err(HandleError::InvalidHandle));
    assert_eq!(table.set(handle, 8), Err(HandleError::InvalidHandle));
    assert!(table.is_empty());
    // Destroying again is harmless.
    table.destroy(handle);
}

#[test]
fn test_table_destroy_drops_value() {
    let drops = Rc::new(Cell::new(0));
    let mut table: Table<DropProbe> = Table::new();
    let handle = table.create(DropProbe(drops.clone())).unwrap();

    table.destroy(handle);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_table_clear_frees_only_live_handles() {
    let drops = Rc::new(Cell::new(0));
    let mut table: Table<DropProbe> =
        Table::with_allocator(HandleAllocator::with_min_free_indices(0));
    let a = table.create(DropProbe(drops.clone())).unwrap();
    let b = table.create(DropProbe(drops.clone())).unwrap();
    table.destroy(a);

    table.clear();

    assert_eq!(drops.get(), 2);
    assert!(table.is_empty());
    assert!(!table.contains(b));

    // `a` was only freed once, so its slot is on generation 1, not 2.
    let reused = table.create(DropProbe(drops.clone())).unwrap();
    assert_eq!(reused.index(), 0);
    assert_eq!(reused.generation(), 1);
}

#[test]
fn test_table_iter_skips_destroyed_entries() {
    let mut table: Table<u8, u64> = Table::new();
    let a = table.create(1).unwrap();
    let b = table.create(2).unwrap();
    let c = table.create(3).unwrap();
    table.destroy(b);

    let live: Vec<(u64, u8)> = table.iter().map(|(h, v)| (h, *v)).collect();
    assert_eq!(live, vec![(a, 1), (c, 3)]);
}

#[test]
fn test_table_remove_returns_ownership() {
    let mut table: Table<String> = Table::new();
    let handle = table.create("owned".to_string()).unwrap();
    assert_eq!(table.remove(handle).unwrap(), "owned");
    assert_eq!(table.remove(handle), Err(HandleError::InvalidHandle));
}
