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

//! Shader stages, their file signatures and per-program stage sets.

use super::handles::ShaderHandle;
use serde::{Deserialize, Serialize};

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderStage {
    /// Vertex stage.
    Vertex,
    /// Pixel (fragment) stage.
    Pixel,
    /// Geometry stage.
    Geometry,
    /// Tessellation control stage.
    Hull,
    /// Tessellation evaluation stage.
    Domain,
}

impl ShaderStage {
    /// All stages in pipeline order.
    pub const ALL: [ShaderStage; 5] = [
        ShaderStage::Vertex,
        ShaderStage::Pixel,
        ShaderStage::Geometry,
        ShaderStage::Hull,
        ShaderStage::Domain,
    ];

    /// The four-byte signature prefixing this stage's bytecode.
    pub const fn signature(self) -> [u8; 4] {
        match self {
            ShaderStage::Vertex => *b"SVTX",
            ShaderStage::Pixel => *b"SPIX",
            ShaderStage::Geometry => *b"SGEO",
            ShaderStage::Hull => *b"STEC",
            ShaderStage::Domain => *b"STEV",
        }
    }
}

/// The compiled stage handles bound by a draw call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShaderStages {
    /// Vertex stage.
    pub vertex: Option<ShaderHandle>,
    /// Pixel stage.
    pub pixel: Option<ShaderHandle>,
    /// Geometry stage.
    pub geometry: Option<ShaderHandle>,
    /// Hull stage.
    pub hull: Option<ShaderHandle>,
    /// Domain stage.
    pub domain: Option<ShaderHandle>,
}

impl ShaderStages {
    /// Returns the handle bound to `stage`.
    pub fn get(&self, stage: ShaderStage) -> Option<ShaderHandle> {
        match stage {
            ShaderStage::Vertex => self.vertex,
            ShaderStage::Pixel => self.pixel,
            ShaderStage::Geometry => self.geometry,
            ShaderStage::Hull => self.hull,
            ShaderStage::Domain => self.domain,
        }
    }

    /// Binds `handle` to `stage`.
    pub fn set(&mut self, stage: ShaderStage, handle: Option<ShaderHandle>) {
        let slot = match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Pixel => &mut self.pixel,
            ShaderStage::Geometry => &mut self.geometry,
            ShaderStage::Hull => &mut self.hull,
            ShaderStage::Domain => &mut self.domain,
        };
        *slot = handle;
    }
}
