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

//! Interleaves separate attribute streams into a single vertex buffer layout.

use crate::managers::VertexMesh;
use bytemuck::Pod;
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::ManagerError;

#[derive(Debug, Clone)]
struct AttributeStream {
    semantic: String,
    attribute_type: VertexAttributeType,
    data: Vec<u8>,
}

/// Builds a [`VertexMesh`] from one stream per attribute.
///
/// ```
/// use vitrum_core::renderer::api::VertexAttributeType;
/// use vitrum_graphics::VertexBuilder;
///
/// let mut builder = VertexBuilder::begin(3);
/// builder
///     .set_attribute("POSITION", VertexAttributeType::Float2, &[0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0])
///     .unwrap();
/// let mesh = builder.end().unwrap();
/// assert_eq!(mesh.vertex_stride, 8);
/// ```
#[derive(Debug, Clone)]
pub struct VertexBuilder {
    vertex_count: u32,
    indices: Vec<u32>,
    streams: Vec<AttributeStream>,
    topology: PrimitiveTopology,
}

impl VertexBuilder {
    /// Starts a mesh of `vertex_count` vertices.
    pub fn begin(vertex_count: u32) -> Self {
        Self {
            vertex_count,
            indices: Vec::new(),
            streams: Vec::new(),
            topology: PrimitiveTopology::TriangleList,
        }
    }

    /// Sets the index data.
    pub fn set_index_stream(&mut self, indices: &[u32]) -> &mut Self {
        self.indices = indices.to_vec();
        self
    }

    /// Sets the primitive topology (triangle list by default).
    pub fn set_topology(&mut self, topology: PrimitiveTopology) -> &mut Self {
        self.topology = topology;
        self
    }

    /// Adds or replaces the stream for `semantic`.
    ///
    /// `data` must hold exactly one `attribute_type` per vertex.
    pub fn set_attribute_stream(
        &mut self,
        semantic: &str,
        attribute_type: VertexAttributeType,
        data: &[u8],
    ) -> Result<&mut Self, ManagerError> {
        let expected = self.vertex_count as usize * attribute_type.size() as usize;
        if data.len() != expected {
            return Err(ManagerError::InvalidOptions(format!(
                "stream '{semantic}' holds {} bytes, expected {expected}",
                data.len()
            )));
        }

        let stream = AttributeStream {
            semantic: semantic.to_string(),
            attribute_type,
            data: data.to_vec(),
        };
        let count = self.streams.len();
        match self.streams.iter_mut().find(|s| s.semantic == semantic) {
            Some(existing) => *existing = stream,
            None if count < MAX_VERTEX_ATTRIBUTES => self.streams.push(stream),
            None => {
                return Err(ManagerError::InvalidOptions(format!(
                    "more than {MAX_VERTEX_ATTRIBUTES} vertex attributes"
                )))
            }
        }
        Ok(self)
    }

    /// Typed [`set_attribute_stream`](Self::set_attribute_stream).
    pub fn set_attribute<T: Pod>(
        &mut self,
        semantic: &str,
        attribute_type: VertexAttributeType,
        data: &[T],
    ) -> Result<&mut Self, ManagerError> {
        self.set_attribute_stream(semantic, attribute_type, bytemuck::cast_slice(data))
    }

    /// Interleaves the streams in the order they were first set.
    pub fn end(&self) -> Result<VertexMesh, ManagerError> {
        if self.vertex_count == 0 || self.streams.is_empty() {
            return Err(ManagerError::InvalidOptions(
                "a mesh needs vertices and at least one attribute".to_string(),
            ));
        }
        if let Some(index) = self.indices.iter().find(|&&i| i >= self.vertex_count) {
            return Err(ManagerError::InvalidOptions(format!(
                "index {index} is out of range for {} vertices",
                self.vertex_count
            )));
        }

        let mut attributes = Vec::with_capacity(self.streams.len());
        let mut stride = 0u32;
        for stream in &self.streams {
            attributes.push(VertexAttribute {
                buffer_slot: 0,
                semantic: stream.semantic.clone(),
                byte_offset: stride,
                attribute_type: stream.attribute_type,
                channel: VertexChannel::PerVertex,
            });
            stride += stream.attribute_type.size();
        }

        let mut vertices = Vec::with_capacity(stride as usize * self.vertex_count as usize);
        for vertex in 0..self.vertex_count as usize {
            for stream in &self.streams {
                let size = stream.attribute_type.size() as usize;
                vertices.extend_from_slice(&stream.data[vertex * size..(vertex + 1) * size]);
            }
        }

        Ok(VertexMesh {
            vertices,
            vertex_stride: stride,
            indices: self.indices.clone(),
            attributes,
            topology: self.topology,
        })
    }
}
