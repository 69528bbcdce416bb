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

//! Recording mocks of the backend traits shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{
    BackendStatus, RenderContext, RenderDevice, RenderError, RenderSurface, ResourceError,
    ResourceKind,
};

#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    next_id: AtomicUsize,
    frames: AtomicU64,
    created: Mutex<Vec<ResourceKind>>,
    destroyed: Mutex<Vec<ResourceKind>>,
    failing: Mutex<Vec<ResourceKind>>,
    display: Mutex<DisplayConfig>,
    display_calls: Mutex<Vec<DisplayConfig>>,
    no_mip_generation: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_display(config: DisplayConfig) -> Arc<Self> {
        Arc::new(Self {
            display: Mutex::new(config),
            ..Default::default()
        })
    }

    pub fn without_mip_generation() -> Arc<Self> {
        Arc::new(Self {
            no_mip_generation: true,
            ..Default::default()
        })
    }

    /// Makes every later creation of `kind` fail.
    pub fn fail(&self, kind: ResourceKind) {
        self.failing.lock().unwrap().push(kind);
    }

    pub fn created(&self, kind: ResourceKind) -> usize {
        self.created.lock().unwrap().iter().filter(|k| **k == kind).count()
    }

    pub fn created_total(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn destroyed(&self, kind: ResourceKind) -> usize {
        self.destroyed.lock().unwrap().iter().filter(|k| **k == kind).count()
    }

    pub fn display_calls(&self) -> Vec<DisplayConfig> {
        self.display_calls.lock().unwrap().clone()
    }

    fn create(&self, kind: ResourceKind) -> Result<usize, ResourceError> {
        if self.failing.lock().unwrap().contains(&kind) {
            return Err(ResourceError::BackendCreateFailed {
                kind,
                status: BackendStatus::Fail,
            });
        }
        self.created.lock().unwrap().push(kind);
        Ok(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn destroy(&self, kind: ResourceKind) -> Result<(), ResourceError> {
        self.destroyed.lock().unwrap().push(kind);
        Ok(())
    }
}

impl RenderDevice for MockGraphicsDevice {
    fn create_buffer(
        &self,
        _descriptor: &BufferDescriptor,
        _data: &[u8],
    ) -> Result<BufferHandle, ResourceError> {
        self.create(ResourceKind::Buffer).map(BufferHandle)
    }

    fn destroy_buffer(&self, _handle: BufferHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::Buffer)
    }

    fn create_texture(
        &self,
        _descriptor: &TextureDescriptor,
        _slices: &[TextureSlice<'_>],
    ) -> Result<TextureHandle, ResourceError> {
        self.create(ResourceKind::Texture).map(TextureHandle)
    }

    fn destroy_texture(&self, _handle: TextureHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::Texture)
    }

    fn supports_mip_generation(&self, format: TextureFormat) -> bool {
        !self.no_mip_generation && !format.is_depth()
    }

    fn create_shader(
        &self,
        _stage: ShaderStage,
        _bytecode: &[u8],
    ) -> Result<ShaderHandle, ResourceError> {
        self.create(ResourceKind::Shader).map(ShaderHandle)
    }

    fn destroy_shader(&self, _handle: ShaderHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::Shader)
    }

    fn create_target(&self, _descriptor: &TargetDescriptor) -> Result<TargetHandle, ResourceError> {
        self.create(ResourceKind::Target).map(TargetHandle)
    }

    fn destroy_target(&self, _handle: TargetHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::Target)
    }

    fn display_target(&self) -> TargetHandle {
        TargetHandle(0)
    }

    fn create_draw_command(
        &self,
        _descriptor: &DrawCommandDesc<'_>,
    ) -> Result<DrawCommandHandle, ResourceError> {
        self.create(ResourceKind::DrawCommand).map(DrawCommandHandle)
    }

    fn destroy_draw_command(&self, _handle: DrawCommandHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::DrawCommand)
    }

    fn create_blend_state(
        &self,
        _descriptor: &BlendStateDesc,
    ) -> Result<BlendStateHandle, ResourceError> {
        self.create(ResourceKind::BlendState).map(BlendStateHandle)
    }

    fn destroy_blend_state(&self, _handle: BlendStateHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::BlendState)
    }

    fn create_depth_state(
        &self,
        _descriptor: &DepthStencilDesc,
    ) -> Result<DepthStateHandle, ResourceError> {
        self.create(ResourceKind::DepthState).map(DepthStateHandle)
    }

    fn destroy_depth_state(&self, _handle: DepthStateHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::DepthState)
    }

    fn create_raster_state(
        &self,
        _descriptor: &RasterStateDesc,
    ) -> Result<RasterStateHandle, ResourceError> {
        self.create(ResourceKind::RasterState).map(RasterStateHandle)
    }

    fn destroy_raster_state(&self, _handle: RasterStateHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::RasterState)
    }

    fn create_sampler_state(
        &self,
        _descriptor: &SamplerDesc,
    ) -> Result<SamplerStateHandle, ResourceError> {
        self.create(ResourceKind::SamplerState).map(SamplerStateHandle)
    }

    fn destroy_sampler_state(&self, _handle: SamplerStateHandle) -> Result<(), ResourceError> {
        self.destroy(ResourceKind::SamplerState)
    }

    fn display_config(&self) -> DisplayConfig {
        *self.display.lock().unwrap()
    }

    fn set_display_config(&self, config: &DisplayConfig) -> Result<(), RenderError> {
        self.display_calls.lock().unwrap().push(*config);
        let mut current = self.display.lock().unwrap();
        let multisample_level = match config.multisample_level {
            0 => current.multisample_level,
            level => level,
        };
        *current = DisplayConfig {
            multisample_level,
            ..*config
        };
        Ok(())
    }

    fn draw_begin(&self) {}

    fn draw_end(&self) {
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    fn stats(&self) -> RenderStats {
        RenderStats {
            frame_number: self.frames.load(Ordering::Relaxed),
            ..Default::default()
        }
    }
}

/// One call received by a [`MockRenderContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContextCall {
    BufferUpdate(BufferHandle, Vec<u8>),
    TextureUpdate(TextureHandle, u32, Vec<u8>),
    TextureResolve(TextureHandle, TextureHandle),
    ClearColour(TargetHandle, [f32; 4]),
    ClearDepth(TargetHandle, f32),
    Draw(DrawCommandHandle),
    Finish,
}

/// Records calls into a shared log. Buffer updates to `failing_buffer` and
/// colour clears of `failing_clear` fail without being recorded.
#[derive(Debug, Default, Clone)]
pub struct MockRenderContext {
    pub calls: Arc<Mutex<Vec<ContextCall>>>,
    pub failing_buffer: Option<BufferHandle>,
    pub failing_clear: Option<TargetHandle>,
}

impl MockRenderContext {
    pub fn calls(&self) -> Vec<ContextCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ContextCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RenderContext for MockRenderContext {
    fn buffer_update(&mut self, buffer: BufferHandle, data: &[u8]) -> Result<(), RenderError> {
        if self.failing_buffer == Some(buffer) {
            return Err(RenderError::Dispatch(format!("buffer {buffer:?} is lost")));
        }
        self.record(ContextCall::BufferUpdate(buffer, data.to_vec()));
        Ok(())
    }

    fn texture_update(
        &mut self,
        texture: TextureHandle,
        index: u32,
        data: &[u8],
    ) -> Result<(), RenderError> {
        self.record(ContextCall::TextureUpdate(texture, index, data.to_vec()));
        Ok(())
    }

    fn texture_resolve(
        &mut self,
        source: TextureHandle,
        destination: TextureHandle,
    ) -> Result<(), RenderError> {
        self.record(ContextCall::TextureResolve(source, destination));
        Ok(())
    }

    fn clear_colour_target(
        &mut self,
        target: TargetHandle,
        colour: [f32; 4],
    ) -> Result<(), RenderError> {
        if self.failing_clear == Some(target) {
            return Err(RenderError::Dispatch(format!("target {target:?} is lost")));
        }
        self.record(ContextCall::ClearColour(target, colour));
        Ok(())
    }

    fn clear_depth_target(&mut self, target: TargetHandle, depth: f32) -> Result<(), RenderError> {
        self.record(ContextCall::ClearDepth(target, depth));
        Ok(())
    }

    fn draw(
        &mut self,
        _target: TargetHandle,
        command: DrawCommandHandle,
        _viewport: Viewport,
        _scissor: Scissor,
    ) -> Result<(), RenderError> {
        self.record(ContextCall::Draw(command));
        Ok(())
    }

    fn finish(&mut self) {
        self.record(ContextCall::Finish);
    }
}

#[derive(Debug, Default)]
pub struct SurfaceState {
    pub size: (u32, u32),
    pub borderless: bool,
    pub resizes: Vec<(u32, u32)>,
    pub borderless_calls: Vec<bool>,
}

#[derive(Debug, Default, Clone)]
pub struct MockSurface {
    pub state: Arc<Mutex<SurfaceState>>,
}

impl MockSurface {
    pub fn sized(width: u32, height: u32) -> Self {
        let surface = Self::default();
        surface.state.lock().unwrap().size = (width, height);
        surface
    }
}

impl RenderSurface for MockSurface {
    fn size(&self) -> (u32, u32) {
        self.state.lock().unwrap().size
    }

    fn resize(&mut self, width: u32, height: u32) {
        let mut state = self.state.lock().unwrap();
        state.size = (width, height);
        state.resizes.push((width, height));
    }

    fn is_borderless(&self) -> bool {
        self.state.lock().unwrap().borderless
    }

    fn enable_borderless(&mut self, enable: bool) {
        let mut state = self.state.lock().unwrap();
        state.borderless = enable;
        state.borderless_calls.push(enable);
    }
}
