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
use crate::renderer::error::RenderError;
use std::fmt::Debug;

/// Executes rendering commands on behalf of one thread.
///
/// Every call is synchronous from the caller's point of view. A failure is
/// reported for the single call only; the context stays usable.
pub trait RenderContext: Debug {
    /// Overwrites the contents of a buffer.
    fn buffer_update(&mut self, buffer: BufferHandle, data: &[u8]) -> Result<(), RenderError>;

    /// Overwrites one array slice of a texture.
    fn texture_update(
        &mut self,
        texture: TextureHandle,
        index: u32,
        data: &[u8],
    ) -> Result<(), RenderError>;

    /// Resolves a multisampled texture into a single-sampled one.
    fn texture_resolve(
        &mut self,
        source: TextureHandle,
        destination: TextureHandle,
    ) -> Result<(), RenderError>;

    /// Clears every colour attachment of a target.
    fn clear_colour_target(
        &mut self,
        target: TargetHandle,
        colour: [f32; 4],
    ) -> Result<(), RenderError>;

    /// Clears the depth attachment of a target.
    fn clear_depth_target(&mut self, target: TargetHandle, depth: f32) -> Result<(), RenderError>;

    /// Executes a compiled draw call into a target.
    fn draw(
        &mut self,
        target: TargetHandle,
        command: DrawCommandHandle,
        viewport: Viewport,
        scissor: Scissor,
    ) -> Result<(), RenderError>;

    /// Flushes the work recorded on this context.
    fn finish(&mut self);
}
