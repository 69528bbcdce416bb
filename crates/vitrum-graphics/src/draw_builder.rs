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

//! Assembles a [`DrawCommand`] from manager-owned resources.

use crate::managers::{BufferManager, MeshManager, ShaderManager, TextureManager};
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::ManagerError;

/// Accumulates bindings, state and draw parameters for one draw call.
///
/// Resources are looked up through their managers when they are set, so a
/// stale id is reported at the call that passed it.
#[derive(Debug, Clone, Default)]
pub struct DrawBuilder {
    command: DrawCommand,
}

fn check_slot(slot: usize, limit: usize, what: &str) -> Result<(), ManagerError> {
    if slot >= limit {
        return Err(ManagerError::InvalidOptions(format!(
            "{what} slot {slot} is out of range (limit {limit})"
        )));
    }
    Ok(())
}

fn check_kind(actual: BufferKind, expected: BufferKind) -> Result<(), ManagerError> {
    if actual != expected {
        return Err(ManagerError::InvalidOptions(format!(
            "expected a {expected:?} buffer, got a {actual:?} buffer"
        )));
    }
    Ok(())
}

impl DrawBuilder {
    /// Creates a builder with default state and nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds every stage of a shader program.
    pub fn set_shader(
        &mut self,
        shaders: &ShaderManager,
        id: ShaderId,
    ) -> Result<&mut Self, ManagerError> {
        self.command.bindings.shaders = shaders.program(id)?.stage_handles();
        Ok(self)
    }

    /// Binds a whole texture to `slot`.
    pub fn set_texture(
        &mut self,
        textures: &TextureManager,
        slot: usize,
        id: TextureId,
    ) -> Result<&mut Self, ManagerError> {
        check_slot(slot, MAX_TEXTURE_SLOTS, "texture")?;
        let instance = textures.get(id)?;
        self.command.bindings.textures[slot] = Some(TextureUnit {
            texture: instance.handle(),
            kind: instance.descriptor().kind,
            array_index: 0,
            array_count: 0,
        });
        Ok(self)
    }

    /// Binds an explicit texture view to `slot`.
    pub fn set_texture_unit(
        &mut self,
        slot: usize,
        unit: TextureUnit,
    ) -> Result<&mut Self, ManagerError> {
        check_slot(slot, MAX_TEXTURE_SLOTS, "texture")?;
        self.command.bindings.textures[slot] = Some(unit);
        Ok(self)
    }

    /// Sets the sampler used by `slot`.
    pub fn set_texture_sampler(
        &mut self,
        slot: usize,
        sampler: SamplerState,
    ) -> Result<&mut Self, ManagerError> {
        check_slot(slot, MAX_SAMPLER_SLOTS, "sampler")?;
        self.command.samplers[slot] = sampler;
        Ok(self)
    }

    /// Binds a constant buffer to `slot`.
    pub fn set_constant_buffer(
        &mut self,
        buffers: &BufferManager,
        slot: usize,
        id: BufferId,
    ) -> Result<&mut Self, ManagerError> {
        check_slot(slot, MAX_CONSTANT_BUFFERS, "constant buffer")?;
        let buffer = buffers.get(id)?;
        check_kind(buffer.kind(), BufferKind::Constant)?;
        self.command.bindings.constant_buffers[slot] = Some(buffer.handle());
        Ok(self)
    }

    /// Binds a vertex buffer to `slot`.
    ///
    /// The layout is described separately with
    /// [`add_vertex_attribute`](Self::add_vertex_attribute).
    pub fn set_vertex_buffer(
        &mut self,
        buffers: &BufferManager,
        slot: usize,
        id: BufferId,
        stride: u32,
        offset: u32,
    ) -> Result<&mut Self, ManagerError> {
        check_slot(slot, MAX_VERTEX_BUFFERS, "vertex buffer")?;
        let buffer = buffers.get(id)?;
        check_kind(buffer.kind(), BufferKind::Vertex)?;
        self.command.bindings.vertex_buffers[slot] = Some(VertexBufferBinding {
            buffer: buffer.handle(),
            stride,
            offset,
        });
        Ok(self)
    }

    /// Appends one attribute to the vertex input layout.
    pub fn add_vertex_attribute(
        &mut self,
        attribute: VertexAttribute,
    ) -> Result<&mut Self, ManagerError> {
        let attributes = &mut self.command.bindings.attributes;
        if attributes.len() >= MAX_VERTEX_ATTRIBUTES {
            return Err(ManagerError::InvalidOptions(format!(
                "more than {MAX_VERTEX_ATTRIBUTES} vertex attributes"
            )));
        }
        check_slot(attribute.buffer_slot as usize, MAX_VERTEX_BUFFERS, "vertex buffer")?;
        attributes.push(attribute);
        Ok(self)
    }

    /// Binds the index buffer.
    pub fn set_index_buffer(
        &mut self,
        buffers: &BufferManager,
        id: BufferId,
    ) -> Result<&mut Self, ManagerError> {
        let buffer = buffers.get(id)?;
        check_kind(buffer.kind(), BufferKind::Index)?;
        self.command.bindings.index_buffer = Some(buffer.handle());
        Ok(self)
    }

    /// Binds a mesh: its buffers, layout, topology and draw range.
    ///
    /// Replaces any vertex buffers and attributes set before.
    pub fn set_mesh(
        &mut self,
        meshes: &MeshManager,
        id: MeshId,
    ) -> Result<&mut Self, ManagerError> {
        let mesh = meshes.instance(id)?;
        let bindings = &mut self.command.bindings;
        bindings.vertex_buffers = Default::default();
        bindings.vertex_buffers[0] = Some(mesh.vertex_binding());
        bindings.index_buffer = mesh.index_buffer();
        bindings.attributes = mesh.attributes().to_vec();
        bindings.topology = mesh.topology();
        bindings.mode = mesh.draw_mode();
        Ok(self)
    }

    /// Sets the primitive topology.
    pub fn set_topology(&mut self, topology: PrimitiveTopology) -> &mut Self {
        self.command.bindings.topology = topology;
        self
    }

    /// Sets the blend state.
    pub fn set_blend_state(&mut self, state: BlendState) -> &mut Self {
        self.command.blend_state = state;
        self
    }

    /// Sets the rasterizer state.
    pub fn set_raster_state(&mut self, state: RasterState) -> &mut Self {
        self.command.raster_state = state;
        self
    }

    /// Sets the depth/stencil state.
    pub fn set_depth_state(&mut self, state: DepthState) -> &mut Self {
        self.command.depth_state = state;
        self
    }

    /// Draws `vertex_count` vertices from `vertex_start`.
    pub fn set_draw(&mut self, vertex_start: u32, vertex_count: u32) -> &mut Self {
        self.command.bindings.mode = DrawMode::Vertices {
            vertex_start,
            vertex_count,
        };
        self
    }

    /// Draws `index_count` indices from `index_start`.
    pub fn set_draw_indexed(
        &mut self,
        index_start: u32,
        index_count: u32,
        vertex_base: i32,
    ) -> &mut Self {
        self.command.bindings.mode = DrawMode::Indexed {
            index_start,
            index_count,
            vertex_base,
        };
        self
    }

    /// Draws `instance_count` copies of a vertex range.
    pub fn set_draw_instanced(
        &mut self,
        vertex_start: u32,
        vertex_count: u32,
        instance_count: u32,
    ) -> &mut Self {
        self.command.bindings.mode = DrawMode::Instanced {
            vertex_start,
            vertex_count,
            instance_count,
        };
        self
    }

    /// Draws `instance_count` copies of an index range.
    pub fn set_draw_indexed_instanced(
        &mut self,
        index_start: u32,
        index_count: u32,
        vertex_base: i32,
        instance_count: u32,
    ) -> &mut Self {
        self.command.bindings.mode = DrawMode::IndexedInstanced {
            index_start,
            index_count,
            vertex_base,
            instance_count,
        };
        self
    }

    /// Returns the assembled draw call.
    ///
    /// ## Errors
    /// * `InvalidOptions` if the draw is indexed but no index buffer is bound.
    pub fn build(&self) -> Result<DrawCommand, ManagerError> {
        let bindings = &self.command.bindings;
        if bindings.mode.is_indexed() && bindings.index_buffer.is_none() {
            return Err(ManagerError::InvalidOptions(
                "indexed draw without an index buffer".to_string(),
            ));
        }
        Ok(self.command.clone())
    }

    /// Clears every binding and restores default state.
    pub fn reset(&mut self) -> &mut Self {
        self.command = DrawCommand::default();
        self
    }
}
