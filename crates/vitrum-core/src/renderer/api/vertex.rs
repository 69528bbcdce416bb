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

//! Vertex layout and primitive assembly types.

use serde::{Deserialize, Serialize};

/// The data type of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexAttributeType {
    /// One `f32`.
    Float1,
    /// Two `f32`.
    Float2,
    /// Three `f32`.
    Float3,
    /// Four `f32`.
    Float4,
    /// A 4x4 `f32` matrix.
    Matrix,
    /// One `i32`.
    Int32,
    /// One `u32`.
    Uint32,
    /// Four normalized `u8`.
    Rgba,
    /// Three `f32` colour channels.
    Rgb,
}

impl VertexAttributeType {
    /// Size of the attribute in bytes.
    pub fn size(self) -> u32 {
        match self {
            VertexAttributeType::Float1 => 4,
            VertexAttributeType::Float2 => 8,
            VertexAttributeType::Float3 => 12,
            VertexAttributeType::Float4 => 16,
            VertexAttributeType::Matrix => 64,
            VertexAttributeType::Int32 | VertexAttributeType::Uint32 => 4,
            VertexAttributeType::Rgba => 4,
            VertexAttributeType::Rgb => 12,
        }
    }
}

/// Whether an attribute advances per vertex or per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VertexChannel {
    /// Advances once per vertex.
    #[default]
    PerVertex,
    /// Advances once per instance.
    PerInstance,
}

/// Describes where one vertex attribute is found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexAttribute {
    /// Vertex buffer slot the attribute is read from.
    pub buffer_slot: u32,
    /// Semantic name matched against the vertex shader inputs.
    pub semantic: String,
    /// Offset of the attribute inside one vertex.
    pub byte_offset: u32,
    /// Data type.
    pub attribute_type: VertexAttributeType,
    /// Step rate.
    pub channel: VertexChannel,
}

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrimitiveTopology {
    /// Isolated points.
    PointList,
    /// Pairs of vertices.
    LineList,
    /// Connected line segments.
    LineStrip,
    /// Triples of vertices.
    #[default]
    TriangleList,
    /// Connected triangles.
    TriangleStrip,
    /// Two-point tessellation patches.
    PatchList2,
    /// Three-point tessellation patches.
    PatchList3,
    /// Four-point tessellation patches.
    PatchList4,
}
