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

//! Deduplicating caches of backend state objects.
//!
//! Draw calls describe fixed-function state with small descriptors. The
//! [`StateManager`] maps each distinct descriptor to one shared backend object,
//! so a thousand draws with the same blend settings hold a thousand
//! references to a single blend state.

mod translate;

pub use translate::BackendState;

use std::sync::Arc;
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{GpuResource, RenderDevice, ResourceError};

/// A backend state object shared between every draw that uses it.
pub type SharedState<H> = Arc<GpuResource<H>>;

/// Caches the backend objects created for one kind of state descriptor.
///
/// Lookup is a linear scan comparing identity keys; the number of distinct
/// states in a frame is small. Entries are never evicted.
#[derive(Debug)]
pub struct StateCache<S: BackendState> {
    device: Arc<dyn RenderDevice>,
    entries: Vec<(S, SharedState<S::Handle>)>,
}

impl<S: BackendState> StateCache<S> {
    /// Creates an empty cache creating its objects on `device`.
    pub fn new(device: Arc<dyn RenderDevice>) -> Self {
        Self {
            device,
            entries: Vec::new(),
        }
    }

    /// Returns the state object for `descriptor`, creating it on first use.
    ///
    /// ## Returns
    ///
    /// A new reference to the cached object. If the backend fails to create
    /// it, the error is returned and nothing is cached.
    pub fn demand(&mut self, descriptor: &S) -> Result<SharedState<S::Handle>, ResourceError> {
        let key = descriptor.key();
        if let Some((_, state)) = self.entries.iter().find(|(cached, _)| cached.key() == key) {
            return Ok(Arc::clone(state));
        }

        let desc = descriptor.translate();
        let handle = S::create(self.device.as_ref(), &desc)?;
        log::debug!("Created state object {handle:?} for {descriptor:?}");

        let state = Arc::new(GpuResource::new(Arc::clone(&self.device), handle));
        self.entries.push((descriptor.clone(), Arc::clone(&state)));
        Ok(state)
    }

    /// Number of distinct state objects created so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the cache's references. Objects still used by compiled draws
    /// live until those draws are dropped.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Number of cached objects per state kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    /// Blend states.
    pub blend: usize,
    /// Depth/stencil states.
    pub depth: usize,
    /// Rasterizer states.
    pub raster: usize,
    /// Sampler states.
    pub sampler: usize,
}

/// The four state caches used to compile draw calls.
#[derive(Debug)]
pub struct StateManager {
    blend: StateCache<BlendState>,
    depth: StateCache<DepthState>,
    raster: StateCache<RasterState>,
    sampler: StateCache<SamplerState>,
}

impl StateManager {
    /// Creates empty caches bound to `device`.
    pub fn new(device: Arc<dyn RenderDevice>) -> Self {
        Self {
            blend: StateCache::new(Arc::clone(&device)),
            depth: StateCache::new(Arc::clone(&device)),
            raster: StateCache::new(Arc::clone(&device)),
            sampler: StateCache::new(device),
        }
    }

    /// See [`StateCache::demand`].
    pub fn demand_blend(
        &mut self,
        state: &BlendState,
    ) -> Result<SharedState<BlendStateHandle>, ResourceError> {
        self.blend.demand(state)
    }

    /// See [`StateCache::demand`].
    pub fn demand_depth(
        &mut self,
        state: &DepthState,
    ) -> Result<SharedState<DepthStateHandle>, ResourceError> {
        self.depth.demand(state)
    }

    /// See [`StateCache::demand`].
    pub fn demand_raster(
        &mut self,
        state: &RasterState,
    ) -> Result<SharedState<RasterStateHandle>, ResourceError> {
        self.raster.demand(state)
    }

    /// See [`StateCache::demand`].
    pub fn demand_sampler(
        &mut self,
        state: &SamplerState,
    ) -> Result<SharedState<SamplerStateHandle>, ResourceError> {
        self.sampler.demand(state)
    }

    /// How many objects each cache holds.
    pub fn cached_counts(&self) -> StateCounts {
        StateCounts {
            blend: self.blend.len(),
            depth: self.depth.len(),
            raster: self.raster.len(),
            sampler: self.sampler.len(),
        }
    }

    /// Empties all four caches.
    pub fn clear(&mut self) {
        self.blend.clear();
        self.depth.clear();
        self.raster.clear();
        self.sampler.clear();
    }
}
