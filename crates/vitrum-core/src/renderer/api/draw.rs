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

//! Describes a single draw call.
//!
//! A [`DrawCommand`] carries fixed-function state as small descriptors. Before
//! the backend sees it, those descriptors are resolved to cached state
//! objects and the result is handed over as a [`DrawCommandDesc`].

use super::handles::{
    BlendStateHandle, BufferHandle, DepthStateHandle, RasterStateHandle, SamplerStateHandle,
    TextureHandle,
};
use super::shader::ShaderStages;
use super::state::{BlendState, DepthState, RasterState, SamplerState};
use super::texture::TextureKind;
use super::vertex::{PrimitiveTopology, VertexAttribute};

/// Number of texture binding slots.
pub const MAX_TEXTURE_SLOTS: usize = 16;
/// Number of sampler binding slots.
pub const MAX_SAMPLER_SLOTS: usize = 8;
/// Number of vertex buffer binding slots.
pub const MAX_VERTEX_BUFFERS: usize = 8;
/// Number of constant buffer binding slots.
pub const MAX_CONSTANT_BUFFERS: usize = 8;
/// Maximum number of vertex attributes per draw.
pub const MAX_VERTEX_ATTRIBUTES: usize = 16;

/// A texture bound to a shader slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureUnit {
    /// The bound texture.
    pub texture: TextureHandle,
    /// How the shader views the texture.
    pub kind: TextureKind,
    /// First array slice visible to the shader.
    pub array_index: u32,
    /// Number of array slices visible; zero means all.
    pub array_count: u32,
}

/// A vertex buffer bound to an input slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferBinding {
    /// The bound buffer.
    pub buffer: BufferHandle,
    /// Bytes between consecutive vertices.
    pub stride: u32,
    /// Bytes skipped at the start of the buffer.
    pub offset: u32,
}

/// Which vertices are drawn, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Non-indexed draw.
    Vertices {
        /// First vertex.
        vertex_start: u32,
        /// Number of vertices.
        vertex_count: u32,
    },
    /// Indexed draw.
    Indexed {
        /// First index.
        index_start: u32,
        /// Number of indices.
        index_count: u32,
        /// Value added to every index.
        vertex_base: i32,
    },
    /// Non-indexed, instanced draw.
    Instanced {
        /// First vertex.
        vertex_start: u32,
        /// Number of vertices per instance.
        vertex_count: u32,
        /// Number of instances.
        instance_count: u32,
    },
    /// Indexed, instanced draw.
    IndexedInstanced {
        /// First index.
        index_start: u32,
        /// Number of indices per instance.
        index_count: u32,
        /// Value added to every index.
        vertex_base: i32,
        /// Number of instances.
        instance_count: u32,
    },
}

impl Default for DrawMode {
    fn default() -> Self {
        DrawMode::Vertices {
            vertex_start: 0,
            vertex_count: 0,
        }
    }
}

impl DrawMode {
    /// Returns `true` if the draw reads an index buffer.
    pub fn is_indexed(&self) -> bool {
        matches!(
            self,
            DrawMode::Indexed { .. } | DrawMode::IndexedInstanced { .. }
        )
    }
}

/// The resource bindings and geometry of a draw call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawBindings {
    /// Shader stages.
    pub shaders: ShaderStages,
    /// Textures by slot.
    pub textures: [Option<TextureUnit>; MAX_TEXTURE_SLOTS],
    /// Constant buffers by slot.
    pub constant_buffers: [Option<BufferHandle>; MAX_CONSTANT_BUFFERS],
    /// Vertex buffers by slot.
    pub vertex_buffers: [Option<VertexBufferBinding>; MAX_VERTEX_BUFFERS],
    /// Index buffer for indexed draws.
    pub index_buffer: Option<BufferHandle>,
    /// Vertex input layout.
    pub attributes: Vec<VertexAttribute>,
    /// Primitive assembly.
    pub topology: PrimitiveTopology,
    /// Draw parameters.
    pub mode: DrawMode,
}

/// A complete draw call described with state descriptors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawCommand {
    /// Resources and geometry.
    pub bindings: DrawBindings,
    /// Blending.
    pub blend_state: BlendState,
    /// Rasterization.
    pub raster_state: RasterState,
    /// Depth and stencil.
    pub depth_state: DepthState,
    /// Samplers by slot; only enabled samplers are bound.
    pub samplers: [SamplerState; MAX_SAMPLER_SLOTS],
}

/// A draw call with its state resolved to backend objects.
#[derive(Debug, Clone, Copy)]
pub struct DrawCommandDesc<'a> {
    /// Resources and geometry.
    pub bindings: &'a DrawBindings,
    /// Blend state object.
    pub blend_state: BlendStateHandle,
    /// Rasterizer state object.
    pub raster_state: RasterStateHandle,
    /// Depth/stencil state object.
    pub depth_state: DepthStateHandle,
    /// Sampler state objects by slot.
    pub samplers: [Option<SamplerStateHandle>; MAX_SAMPLER_SLOTS],
}
