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

//! Fixed-function pipeline state.
//!
//! Two layers live here. The *state descriptors* ([`BlendState`],
//! [`DepthState`], [`RasterState`], [`SamplerState`]) are the small values a
//! draw call is built with. The `*Desc` types are the fully expanded objects a
//! backend is asked to create; the graphics layer translates the former into
//! the latter and caches the result.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A state descriptor with a narrow identity used for cache lookup.
///
/// Two descriptors with equal keys map to the same backend object even when
/// fields outside the key differ.
pub trait StateDescriptor: Clone + Debug {
    /// The fields that determine identity.
    type Key: PartialEq + Debug;

    /// Extracts the identity key.
    fn key(&self) -> Self::Key;
}

// --- Draw-facing state descriptors ---

/// Polygon fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FillMode {
    /// Filled triangles.
    #[default]
    Solid,
    /// Triangle edges only.
    Wireframe,
}

/// Which triangle faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CullMode {
    /// Keep every face.
    #[default]
    None,
    /// Discard back faces.
    Back,
    /// Discard front faces.
    Front,
}

/// Rasterizer settings of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RasterState {
    /// Clip fragments to the scissor rectangle.
    pub enable_scissor: bool,
    /// Face culling.
    pub cull_mode: CullMode,
    /// Polygon fill.
    pub fill_mode: FillMode,
}

impl StateDescriptor for RasterState {
    type Key = (bool, CullMode, FillMode);

    fn key(&self) -> Self::Key {
        (self.enable_scissor, self.cull_mode, self.fill_mode)
    }
}

/// Blending settings of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlendState {
    /// Alpha blending on or off.
    pub enable: bool,
}

impl StateDescriptor for BlendState {
    type Key = bool;

    fn key(&self) -> Self::Key {
        self.enable
    }
}

/// Depth and stencil settings of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DepthState {
    /// Depth testing on or off.
    pub enable_depth: bool,
    /// Stencil testing on or off.
    pub enable_stencil: bool,
}

impl StateDescriptor for DepthState {
    type Key = (bool, bool);

    fn key(&self) -> Self::Key {
        (self.enable_depth, self.enable_stencil)
    }
}

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressMode {
    /// Repeat the texture.
    #[default]
    Wrap,
    /// Repeat the texture, mirroring every other tile.
    Mirror,
    /// Clamp to the edge texel.
    Clamp,
    /// Use the sampler's border colour.
    Border,
}

/// Texture filtering quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Filtering {
    /// Nearest texel, nearest mip.
    #[default]
    Point,
    /// Linear within a mip, nearest mip.
    Bilinear,
    /// Linear within and between mips.
    Trilinear,
    /// Anisotropic, 2 samples.
    Anisotropic2x,
    /// Anisotropic, 4 samples.
    Anisotropic4x,
    /// Anisotropic, 8 samples.
    Anisotropic8x,
    /// Anisotropic, 16 samples.
    Anisotropic16x,
}

/// An 8-bit-per-channel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Creates a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts to floats in `[0, 1]`.
    pub fn to_normalized(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

/// Sampler settings for one texture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SamplerState {
    /// Whether the slot is bound at all. Not part of the identity key.
    pub enabled: bool,
    /// Addressing along U.
    pub address_u: AddressMode,
    /// Addressing along V.
    pub address_v: AddressMode,
    /// Addressing along W.
    pub address_w: AddressMode,
    /// Colour returned in [`AddressMode::Border`] mode.
    pub border_colour: Rgba8,
    /// Filtering quality.
    pub filtering: Filtering,
}

impl StateDescriptor for SamplerState {
    type Key = (AddressMode, AddressMode, AddressMode, Rgba8, Filtering);

    fn key(&self) -> Self::Key {
        (
            self.address_u,
            self.address_v,
            self.address_w,
            self.border_colour,
            self.filtering,
        )
    }
}

// --- Backend state objects ---

/// Comparison used by depth, stencil and comparison-sampler tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunction {
    /// Never passes.
    Never,
    /// Passes if the new value is less than the stored one.
    Less,
    /// Passes if the values are equal.
    Equal,
    /// Passes if the new value is less than or equal to the stored one.
    LessEqual,
    /// Passes if the new value is greater than the stored one.
    Greater,
    /// Passes if the values differ.
    NotEqual,
    /// Passes if the new value is greater than or equal to the stored one.
    GreaterEqual,
    /// Always passes.
    Always,
}

/// A factor applied to the source or destination in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// `0`.
    Zero,
    /// `1`.
    One,
    /// Source alpha.
    SrcAlpha,
    /// `1 - source alpha`.
    InvSrcAlpha,
    /// Destination alpha.
    DestAlpha,
    /// `1 - destination alpha`.
    InvDestAlpha,
}

/// How weighted source and destination are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOp {
    /// `src + dst`.
    Add,
    /// `src - dst`.
    Subtract,
    /// `dst - src`.
    ReverseSubtract,
    /// `min(src, dst)`.
    Min,
    /// `max(src, dst)`.
    Max,
}

bitflags! {
    /// Colour channels written by the output merger.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColourWrites: u8 {
        /// Red channel.
        const RED = 1 << 0;
        /// Green channel.
        const GREEN = 1 << 1;
        /// Blue channel.
        const BLUE = 1 << 2;
        /// Alpha channel.
        const ALPHA = 1 << 3;
        /// All four channels.
        const ALL = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
    }
}

/// A backend blend state object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendStateDesc {
    /// Derive coverage from alpha when multisampling.
    pub alpha_to_coverage: bool,
    /// Use separate settings per render target.
    pub independent_blend: bool,
    /// Blending on or off.
    pub enable: bool,
    /// Colour source factor.
    pub src_colour: BlendFactor,
    /// Colour destination factor.
    pub dst_colour: BlendFactor,
    /// Colour combine operation.
    pub colour_op: BlendOp,
    /// Alpha source factor.
    pub src_alpha: BlendFactor,
    /// Alpha destination factor.
    pub dst_alpha: BlendFactor,
    /// Alpha combine operation.
    pub alpha_op: BlendOp,
    /// Channels written.
    pub write_mask: ColourWrites,
}

/// An action applied to the stencil buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilOp {
    /// Keep the stored value.
    Keep,
    /// Write zero.
    Zero,
    /// Write the reference value.
    Replace,
    /// Increment, clamping.
    IncrementClamp,
    /// Decrement, clamping.
    DecrementClamp,
    /// Bitwise invert.
    Invert,
}

/// Stencil behaviour for one triangle facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilFaceDesc {
    /// Comparison against the reference value.
    pub compare: CompareFunction,
    /// Action when the stencil test fails.
    pub fail_op: StencilOp,
    /// Action when the stencil test passes but the depth test fails.
    pub depth_fail_op: StencilOp,
    /// Action when both tests pass.
    pub pass_op: StencilOp,
}

/// Whether depth writes are performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthWriteMask {
    /// No depth writes.
    Zero,
    /// Depth writes on.
    All,
}

/// A backend depth/stencil state object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthStencilDesc {
    /// Depth testing on or off.
    pub depth_enable: bool,
    /// Depth writes.
    pub depth_write_mask: DepthWriteMask,
    /// Depth comparison.
    pub depth_compare: CompareFunction,
    /// Stencil testing on or off.
    pub stencil_enable: bool,
    /// Bits read from the stencil buffer.
    pub stencil_read_mask: u8,
    /// Bits written to the stencil buffer.
    pub stencil_write_mask: u8,
    /// Stencil behaviour for front faces.
    pub front_face: StencilFaceDesc,
    /// Stencil behaviour for back faces.
    pub back_face: StencilFaceDesc,
}

/// A backend rasterizer state object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterStateDesc {
    /// Polygon fill.
    pub fill_mode: FillMode,
    /// Face culling.
    pub cull_mode: CullMode,
    /// Scissor test on or off.
    pub scissor_enable: bool,
    /// Multisample rasterization on or off.
    pub multisample_enable: bool,
    /// Clip against the near and far planes.
    pub depth_clip_enable: bool,
}

/// Texture filter selected for minification, magnification and mips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Point everywhere.
    MinMagMipPoint,
    /// Linear min/mag, point between mips.
    MinMagLinearMipPoint,
    /// Linear everywhere.
    MinMagMipLinear,
    /// Anisotropic filtering.
    Anisotropic,
}

/// A backend sampler state object.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerDesc {
    /// Addressing along U.
    pub address_u: AddressMode,
    /// Addressing along V.
    pub address_v: AddressMode,
    /// Addressing along W.
    pub address_w: AddressMode,
    /// Texture filter.
    pub filter: FilterMode,
    /// Sample count for anisotropic filtering only.
    pub max_anisotropy: Option<u32>,
    /// Comparison for comparison samplers.
    pub compare: CompareFunction,
    /// Lowest mip level of detail.
    pub min_lod: f32,
    /// Highest mip level of detail.
    pub max_lod: f32,
    /// Offset added to the computed level of detail.
    pub mip_lod_bias: f32,
    /// Normalized border colour.
    pub border_colour: [f32; 4],
}
