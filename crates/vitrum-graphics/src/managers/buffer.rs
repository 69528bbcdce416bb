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

use super::attached;
use crate::command::{Command, CommandBatch};
use bytemuck::Pod;
use std::sync::Arc;
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{GpuResource, ManagerError, RenderDevice};
use vitrum_core::table::{HandleAllocator, Table};

/// A standalone buffer owned by the [`BufferManager`].
#[derive(Debug)]
pub struct BufferInstance {
    resource: GpuResource<BufferHandle>,
    kind: BufferKind,
    size: usize,
}

impl BufferInstance {
    /// The backend buffer.
    pub fn handle(&self) -> BufferHandle {
        self.resource.handle()
    }

    /// How the buffer is bound.
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Creates vertex, index and constant buffers and records their updates.
#[derive(Debug, Default)]
pub struct BufferManager {
    device: Option<Arc<dyn RenderDevice>>,
    buffers: Table<BufferInstance, BufferId>,
}

impl BufferManager {
    /// Creates a manager creating buffers on `device`.
    pub fn new(device: Arc<dyn RenderDevice>) -> Self {
        Self {
            device: Some(device),
            buffers: Table::new(),
        }
    }

    /// Replaces the handle quarantine size. Call before creating anything.
    pub fn with_min_free_indices(mut self, min_free_indices: usize) -> Self {
        self.buffers =
            Table::with_allocator(HandleAllocator::with_min_free_indices(min_free_indices));
        self
    }

    /// Creates a buffer of `kind` holding `data`.
    pub fn create(&mut self, kind: BufferKind, data: &[u8]) -> Result<BufferId, ManagerError> {
        let device = attached(&self.device)?;
        if data.is_empty() {
            return Err(ManagerError::InvalidOptions(
                "buffers cannot be empty".to_string(),
            ));
        }

        let handle = device.create_buffer(&BufferDescriptor::for_data(kind, data), data)?;
        let instance = BufferInstance {
            resource: GpuResource::new(Arc::clone(device), handle),
            kind,
            size: data.len(),
        };
        log::debug!("Created {kind:?} buffer {handle:?} ({} bytes)", data.len());
        Ok(self.buffers.create(instance)?)
    }

    /// Creates a constant buffer initialised with `value`.
    pub fn create_constant<T: Pod>(&mut self, value: &T) -> Result<BufferId, ManagerError> {
        self.create(BufferKind::Constant, bytemuck::bytes_of(value))
    }

    /// Creates a vertex buffer from a slice of plain vertices.
    pub fn create_vertex<T: Pod>(&mut self, vertices: &[T]) -> Result<BufferId, ManagerError> {
        self.create(BufferKind::Vertex, bytemuck::cast_slice(vertices))
    }

    /// Creates an index buffer of 32-bit indices.
    pub fn create_index(&mut self, indices: &[u32]) -> Result<BufferId, ManagerError> {
        self.create(BufferKind::Index, bytemuck::cast_slice(indices))
    }

    /// Records an overwrite of the whole buffer into `batch`.
    ///
    /// The data takes effect when the batch is flushed.
    pub fn update(
        &self,
        batch: &mut CommandBatch,
        id: BufferId,
        data: &[u8],
    ) -> Result<(), ManagerError> {
        let instance = self.get(id)?;
        if data.len() > instance.size {
            return Err(ManagerError::InvalidOptions(format!(
                "update of {} bytes exceeds buffer size {}",
                data.len(),
                instance.size
            )));
        }
        batch.push(
            Command::BufferUpdate {
                buffer: instance.handle(),
            },
            Some(data),
        );
        Ok(())
    }

    /// Typed [`update`](Self::update) for constant buffers.
    pub fn update_constant<T: Pod>(
        &self,
        batch: &mut CommandBatch,
        id: BufferId,
        value: &T,
    ) -> Result<(), ManagerError> {
        self.update(batch, id, bytemuck::bytes_of(value))
    }

    /// Borrows a buffer.
    pub fn get(&self, id: BufferId) -> Result<&BufferInstance, ManagerError> {
        attached(&self.device)?;
        Ok(self.buffers.get(id)?)
    }

    /// The backend handle of a buffer.
    pub fn handle(&self, id: BufferId) -> Result<BufferHandle, ManagerError> {
        self.get(id).map(BufferInstance::handle)
    }

    /// Destroys a buffer. Stale ids are ignored.
    pub fn destroy(&mut self, id: BufferId) {
        self.buffers.destroy(id);
    }

    /// Destroys every buffer.
    pub fn clear(&mut self) {
        self.buffers.clear();
    }

    /// Number of live buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` if no buffer is alive.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
