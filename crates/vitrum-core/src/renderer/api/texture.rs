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

//! Provides types for describing textures and render targets.

use super::handles::TextureHandle;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// The pixel format of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureFormat {
    /// One unsigned byte per pixel.
    Byte,
    /// Three unsigned bytes per pixel.
    ColourRgb,
    /// Four unsigned bytes per pixel, red first.
    ColourRgba,
    /// Four unsigned bytes per pixel, alpha first.
    ColourArgb,
    /// One 32-bit float per pixel.
    Float1,
    /// Two 32-bit floats per pixel.
    Float2,
    /// Three 32-bit floats per pixel.
    Float3,
    /// Four 32-bit floats per pixel.
    Float4,
    /// 16-bit depth.
    Depth16,
    /// 32-bit float depth.
    Depth32,
}

impl TextureFormat {
    /// Size of one pixel in bytes.
    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            TextureFormat::Byte => 1,
            TextureFormat::ColourRgb => 3,
            TextureFormat::ColourRgba | TextureFormat::ColourArgb => 4,
            TextureFormat::Float1 => 4,
            TextureFormat::Float2 => 8,
            TextureFormat::Float3 => 12,
            TextureFormat::Float4 => 16,
            TextureFormat::Depth16 => 2,
            TextureFormat::Depth32 => 4,
        }
    }

    /// Returns `true` for depth formats.
    pub fn is_depth(self) -> bool {
        matches!(self, TextureFormat::Depth16 | TextureFormat::Depth32)
    }
}

/// The dimensionality of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureKind {
    /// A row of texels.
    Texture1D,
    /// A plane of texels.
    Texture2D,
    /// A volume of texels.
    Texture3D,
    /// Six square faces.
    TextureCube,
}

bitflags! {
    /// The ways a texture may be bound.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TextureUsage: u8 {
        /// Sampled from shaders.
        const SHADER_RESOURCE = 1 << 0;
        /// Written as a colour attachment.
        const RENDER_TARGET = 1 << 1;
        /// Written as a depth attachment.
        const DEPTH_TARGET = 1 << 2;
    }
}

/// A descriptor used to create a texture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Pixel format.
    pub format: TextureFormat,
    /// Dimensionality.
    pub kind: TextureKind,
    /// Allowed bindings.
    pub usage: TextureUsage,
    /// Width in texels.
    pub width: u32,
    /// Height in texels (1 for 1D textures).
    pub height: u32,
    /// Depth in texels (3D textures only).
    pub depth: u32,
    /// Number of array slices; cube maps count 6 per cube.
    pub array_size: u32,
    /// Whether the backend should allocate and generate a mip chain.
    pub use_mips: bool,
    /// Samples per pixel.
    pub multisampling: u32,
}

impl Default for TextureDescriptor {
    fn default() -> Self {
        Self {
            format: TextureFormat::ColourRgba,
            kind: TextureKind::Texture2D,
            usage: TextureUsage::SHADER_RESOURCE,
            width: 0,
            height: 0,
            depth: 0,
            array_size: 1,
            use_mips: false,
            multisampling: 1,
        }
    }
}

impl TextureDescriptor {
    /// Bytes in one row at mip level zero, or `None` if that overflows a `u32`.
    pub fn row_pitch(&self) -> Option<u32> {
        self.width.checked_mul(self.format.bytes_per_pixel())
    }

    /// Bytes in one 2D image at mip level zero, or `None` if that overflows a `u32`.
    pub fn depth_pitch(&self) -> Option<u32> {
        self.row_pitch()?.checked_mul(self.height.max(1))
    }

    /// Size in bytes of a single array slice at mip level zero.
    ///
    /// `None` when the dimensions overflow.
    pub fn slice_size(&self) -> Option<usize> {
        let depth = match self.kind {
            TextureKind::Texture3D => self.depth.max(1) as usize,
            _ => 1,
        };
        (self.depth_pitch()? as usize).checked_mul(depth)
    }

    /// Number of array slices the initial data must provide.
    pub fn slice_count(&self) -> usize {
        self.array_size.max(1) as usize
    }
}

/// A view of the initial contents of one texture array slice.
#[derive(Debug, Clone, Copy)]
pub struct TextureSlice<'a> {
    /// Raw texel bytes.
    pub data: &'a [u8],
    /// Bytes between the start of two consecutive rows.
    pub row_pitch: u32,
    /// Bytes between the start of two consecutive depth layers.
    pub depth_pitch: u32,
}

/// Maximum number of colour attachments a render target can hold.
pub const MAX_RENDER_TEXTURES: usize = 8;

/// One attachment of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetAttachment {
    /// The texture rendered into.
    pub texture: TextureHandle,
    /// The array slice written.
    pub index: u32,
}

/// A descriptor used to create a render target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Colour attachments in slot order.
    pub render_textures: Vec<TargetAttachment>,
    /// Optional depth attachment.
    pub depth_texture: Option<TargetAttachment>,
}
