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

use super::{attached, FileResolver};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vitrum_core::asset::{Container, ModelContainer};
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{GpuResource, ManagerError, RenderDevice};
use vitrum_core::table::{HandleAllocator, Table};

/// Interleaved geometry ready to be uploaded, as produced by
/// [`VertexBuilder`](crate::VertexBuilder).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexMesh {
    /// Interleaved vertex data.
    pub vertices: Vec<u8>,
    /// Bytes per vertex.
    pub vertex_stride: u32,
    /// Index data; empty for non-indexed geometry.
    pub indices: Vec<u32>,
    /// Layout of one vertex.
    pub attributes: Vec<VertexAttribute>,
    /// Primitive assembly.
    pub topology: PrimitiveTopology,
}

impl VertexMesh {
    /// Number of whole vertices in the vertex data.
    pub fn vertex_count(&self) -> u32 {
        match self.vertex_stride {
            0 => 0,
            stride => (self.vertices.len() / stride as usize) as u32,
        }
    }
}

/// GPU geometry owned by the [`MeshManager`].
#[derive(Debug)]
pub struct MeshInstance {
    vertex_buffer: Arc<GpuResource<BufferHandle>>,
    index_buffer: Option<Arc<GpuResource<BufferHandle>>>,
    vertex_stride: u32,
    attributes: Vec<VertexAttribute>,
    topology: PrimitiveTopology,
    mode: DrawMode,
}

impl MeshInstance {
    /// The vertex buffer binding for slot 0.
    pub fn vertex_binding(&self) -> VertexBufferBinding {
        VertexBufferBinding {
            buffer: self.vertex_buffer.handle(),
            stride: self.vertex_stride,
            offset: 0,
        }
    }

    /// The index buffer, for indexed meshes.
    pub fn index_buffer(&self) -> Option<BufferHandle> {
        self.index_buffer.as_ref().map(|buffer| buffer.handle())
    }

    /// Layout of one vertex.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Primitive assembly.
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Draw parameters covering the whole mesh.
    pub fn draw_mode(&self) -> DrawMode {
        self.mode
    }
}

/// Uploads geometry and owns the resulting vertex and index buffers.
#[derive(Debug, Default)]
pub struct MeshManager {
    device: Option<Arc<dyn RenderDevice>>,
    files: FileResolver,
    meshes: Table<MeshInstance, MeshId>,
}

impl MeshManager {
    /// Creates a manager creating buffers on `device` and reading from `files`.
    pub fn new(device: Arc<dyn RenderDevice>, files: FileResolver) -> Self {
        Self {
            device: Some(device),
            files,
            ..Default::default()
        }
    }

    /// Replaces the handle quarantine size. Call before creating anything.
    pub fn with_min_free_indices(mut self, min_free_indices: usize) -> Self {
        self.meshes =
            Table::with_allocator(HandleAllocator::with_min_free_indices(min_free_indices));
        self
    }

    /// Uploads `mesh` into new vertex and index buffers.
    pub fn create(&mut self, mesh: &VertexMesh) -> Result<MeshId, ManagerError> {
        let device = Arc::clone(attached(&self.device)?);

        if mesh.vertex_stride == 0 || mesh.vertices.is_empty() {
            return Err(ManagerError::InvalidOptions(
                "mesh has no vertex data".to_string(),
            ));
        }
        if mesh.vertices.len() % mesh.vertex_stride as usize != 0 {
            return Err(ManagerError::InvalidOptions(format!(
                "vertex data ({} bytes) is not a multiple of the stride ({})",
                mesh.vertices.len(),
                mesh.vertex_stride
            )));
        }

        let vertex_buffer = Arc::new(upload(&device, BufferKind::Vertex, &mesh.vertices)?);
        let index_buffer = if mesh.indices.is_empty() {
            None
        } else {
            let indices: &[u8] = bytemuck::cast_slice(&mesh.indices);
            Some(Arc::new(upload(&device, BufferKind::Index, indices)?))
        };

        let mode = match index_buffer {
            Some(_) => DrawMode::Indexed {
                index_start: 0,
                index_count: mesh.indices.len() as u32,
                vertex_base: 0,
            },
            None => DrawMode::Vertices {
                vertex_start: 0,
                vertex_count: mesh.vertex_count(),
            },
        };

        let instance = MeshInstance {
            vertex_buffer,
            index_buffer,
            vertex_stride: mesh.vertex_stride,
            attributes: mesh.attributes.clone(),
            topology: mesh.topology,
            mode,
        };
        Ok(self.meshes.create(instance)?)
    }

    /// Loads a `TSMD` model file, creating one mesh per mesh range.
    ///
    /// All meshes of a model share its vertex and index buffers.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Vec<MeshId>, ManagerError> {
        let path = path.as_ref();
        let result = self.load_model(path);
        if let Err(err) = &result {
            log::warn!("Failed to load model '{}': {err}", path.display());
        }
        result
    }

    fn load_model(&mut self, path: &Path) -> Result<Vec<MeshId>, ManagerError> {
        let device = Arc::clone(attached(&self.device)?);
        let resolved = self.files.resolve(path)?;
        let bytes = self.files.read(&resolved)?;
        let model =
            ModelContainer::decode(&bytes).map_err(|e| ManagerError::corrupt(&resolved, e))?;

        if model.vertex_stride == 0 || model.vertices.is_empty() {
            return Err(ManagerError::FileCorrupt {
                path: resolved,
                reason: "model has no vertex data".to_string(),
            });
        }
        let vertex_total = (model.vertices.len() / model.vertex_stride as usize) as u64;
        let index_total = model.indices.len() as u64;
        let out_of_range = model.meshes.iter().any(|mesh| {
            let (start, count, total) = match mesh.index_count {
                0 => (mesh.vertex_start, mesh.vertex_count, vertex_total),
                n => (mesh.index_start, n, index_total),
            };
            u64::from(start) + u64::from(count) > total
        });
        if out_of_range {
            return Err(ManagerError::FileCorrupt {
                path: resolved,
                reason: "mesh range exceeds model data".to_string(),
            });
        }

        let vertex_buffer = Arc::new(upload(&device, BufferKind::Vertex, &model.vertices)?);
        let index_buffer = if model.indices.is_empty() {
            None
        } else {
            let indices: &[u8] = bytemuck::cast_slice(&model.indices);
            Some(Arc::new(upload(&device, BufferKind::Index, indices)?))
        };

        let mut ids = Vec::with_capacity(model.meshes.len());
        for mesh in &model.meshes {
            let mode = match mesh.index_count {
                0 => DrawMode::Vertices {
                    vertex_start: mesh.vertex_start,
                    vertex_count: mesh.vertex_count,
                },
                index_count => DrawMode::Indexed {
                    index_start: mesh.index_start,
                    index_count,
                    vertex_base: mesh.vertex_base,
                },
            };
            let instance = MeshInstance {
                vertex_buffer: Arc::clone(&vertex_buffer),
                index_buffer: index_buffer.clone(),
                vertex_stride: model.vertex_stride,
                attributes: model.attributes.clone(),
                topology: PrimitiveTopology::TriangleList,
                mode,
            };
            ids.push(self.meshes.create(instance)?);
        }

        log::info!(
            "Loaded model '{}' ({} meshes)",
            resolved.display(),
            ids.len()
        );
        Ok(ids)
    }

    /// Borrows a mesh.
    pub fn instance(&self, id: MeshId) -> Result<&MeshInstance, ManagerError> {
        attached(&self.device)?;
        Ok(self.meshes.get(id)?)
    }

    /// Destroys a mesh. Stale ids are ignored.
    pub fn destroy(&mut self, id: MeshId) {
        self.meshes.destroy(id);
    }

    /// Destroys every mesh.
    pub fn clear(&mut self) {
        self.meshes.clear();
    }

    /// Number of live meshes.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Returns `true` if no mesh is alive.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// The directory model files are read from.
    pub fn root_path(&self) -> &Path {
        self.files.root()
    }

    /// Changes the directory model files are read from.
    pub fn set_root_path(&mut self, root: impl Into<PathBuf>) {
        self.files.set_root(root);
    }
}

fn upload(
    device: &Arc<dyn RenderDevice>,
    kind: BufferKind,
    data: &[u8],
) -> Result<GpuResource<BufferHandle>, ManagerError> {
    let handle = device.create_buffer(&BufferDescriptor::for_data(kind, data), data)?;
    Ok(GpuResource::new(Arc::clone(device), handle))
}
