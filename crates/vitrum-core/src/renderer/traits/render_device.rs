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

use crate::renderer::api::*;
use crate::renderer::error::{RenderError, ResourceError};
use std::fmt::Debug;

/// The resource-creation half of a graphics backend.
///
/// A device creates and destroys every GPU object and owns the display swap
/// chain. It is shared between threads behind an `Arc`; commands are executed
/// through a [`RenderContext`](super::RenderContext) instead.
pub trait RenderDevice: Send + Sync + Debug + 'static {
    /// Creates a GPU buffer initialised with `data`.
    /// ## Arguments
    /// * `descriptor` - The buffer kind and size.
    /// * `data` - Initial contents; may be shorter than `descriptor.size`.
    /// ## Returns
    /// The handle of the new buffer.
    fn create_buffer(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferHandle, ResourceError>;

    /// Destroys a GPU buffer.
    fn destroy_buffer(&self, handle: BufferHandle) -> Result<(), ResourceError>;

    /// Creates a texture initialised with one slice of data per array layer.
    /// ## Arguments
    /// * `descriptor` - Format, dimensions and usage of the texture.
    /// * `slices` - Initial contents. Empty for render and depth targets.
    /// ## Errors
    /// * `ResourceError::BackendCreateFailed` with `InvalidTextureFormat` if the
    ///   format cannot be used the way `descriptor.usage` asks.
    fn create_texture(
        &self,
        descriptor: &TextureDescriptor,
        slices: &[TextureSlice<'_>],
    ) -> Result<TextureHandle, ResourceError>;

    /// Destroys a texture.
    fn destroy_texture(&self, handle: TextureHandle) -> Result<(), ResourceError>;

    /// Returns `true` if mip chains can be generated for `format`.
    fn supports_mip_generation(&self, format: TextureFormat) -> bool;

    /// Creates one shader stage from compiled bytecode.
    fn create_shader(
        &self,
        stage: ShaderStage,
        bytecode: &[u8],
    ) -> Result<ShaderHandle, ResourceError>;

    /// Destroys a shader stage.
    fn destroy_shader(&self, handle: ShaderHandle) -> Result<(), ResourceError>;

    /// Creates a render target from colour and depth attachments.
    fn create_target(&self, descriptor: &TargetDescriptor) -> Result<TargetHandle, ResourceError>;

    /// Destroys a render target.
    fn destroy_target(&self, handle: TargetHandle) -> Result<(), ResourceError>;

    /// Returns the render target that presents to the display.
    fn display_target(&self) -> TargetHandle;

    /// Compiles a draw call with resolved state objects.
    fn create_draw_command(
        &self,
        descriptor: &DrawCommandDesc<'_>,
    ) -> Result<DrawCommandHandle, ResourceError>;

    /// Destroys a compiled draw call.
    fn destroy_draw_command(&self, handle: DrawCommandHandle) -> Result<(), ResourceError>;

    /// Creates a blend state object.
    fn create_blend_state(
        &self,
        descriptor: &BlendStateDesc,
    ) -> Result<BlendStateHandle, ResourceError>;

    /// Destroys a blend state object.
    fn destroy_blend_state(&self, handle: BlendStateHandle) -> Result<(), ResourceError>;

    /// Creates a depth/stencil state object.
    fn create_depth_state(
        &self,
        descriptor: &DepthStencilDesc,
    ) -> Result<DepthStateHandle, ResourceError>;

    /// Destroys a depth/stencil state object.
    fn destroy_depth_state(&self, handle: DepthStateHandle) -> Result<(), ResourceError>;

    /// Creates a rasterizer state object.
    fn create_raster_state(
        &self,
        descriptor: &RasterStateDesc,
    ) -> Result<RasterStateHandle, ResourceError>;

    /// Destroys a rasterizer state object.
    fn destroy_raster_state(&self, handle: RasterStateHandle) -> Result<(), ResourceError>;

    /// Creates a sampler state object.
    fn create_sampler_state(
        &self,
        descriptor: &SamplerDesc,
    ) -> Result<SamplerStateHandle, ResourceError>;

    /// Destroys a sampler state object.
    fn destroy_sampler_state(&self, handle: SamplerStateHandle) -> Result<(), ResourceError>;

    /// Reads the current display configuration.
    fn display_config(&self) -> DisplayConfig;

    /// Reconfigures the display swap chain.
    ///
    /// A `multisample_level` of zero keeps the current level.
    fn set_display_config(&self, config: &DisplayConfig) -> Result<(), RenderError>;

    /// Marks the start of a frame.
    fn draw_begin(&self);

    /// Marks the end of a frame and presents it.
    fn draw_end(&self);

    /// Statistics of the last completed frame.
    fn stats(&self) -> RenderStats;
}
