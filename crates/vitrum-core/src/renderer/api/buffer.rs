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

//! Buffer kinds and creation descriptors.

use serde::{Deserialize, Serialize};

/// How a buffer will be bound by draw commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferKind {
    /// Per-vertex or per-instance attribute data.
    Vertex,
    /// 32-bit indices into a vertex buffer.
    Index,
    /// Shader constants, updated through buffer update commands.
    Constant,
}

/// A descriptor used to create a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDescriptor {
    /// How the buffer is bound.
    pub kind: BufferKind,
    /// Size of the buffer in bytes.
    pub size: usize,
}

impl BufferDescriptor {
    /// Describes a buffer of `kind` large enough for `data`.
    pub fn for_data(kind: BufferKind, data: &[u8]) -> Self {
        Self {
            kind,
            size: data.len(),
        }
    }
}
