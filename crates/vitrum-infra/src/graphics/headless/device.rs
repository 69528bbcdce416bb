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

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{BackendStatus, RenderDevice, RenderError, ResourceError, ResourceKind};

/// The handle value of the display target. Never handed out by `create_target`.
pub const DISPLAY_TARGET: TargetHandle = TargetHandle(0);

#[derive(Debug)]
pub(crate) struct HeadlessBufferEntry {
    pub(crate) kind: BufferKind,
    pub(crate) data: Vec<u8>,
}

#[derive(Debug)]
pub(crate) struct HeadlessTextureEntry {
    pub(crate) descriptor: TextureDescriptor,
    pub(crate) slices: Vec<Vec<u8>>,
}

#[allow(dead_code)]
#[derive(Debug)]
pub(crate) struct HeadlessDrawEntry {
    pub(crate) bindings: DrawBindings,
    pub(crate) samplers: [Option<SamplerStateHandle>; MAX_SAMPLER_SLOTS],
}

/// One table of live backend objects.
#[derive(Debug)]
struct Registry<T> {
    kind: ResourceKind,
    entries: Mutex<HashMap<usize, T>>,
}

impl<T> Registry<T> {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<usize, T>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(&self, id: usize, value: T) {
        self.lock().insert(id, value);
    }

    fn remove(&self, id: usize) -> Result<T, ResourceError> {
        self.lock()
            .remove(&id)
            .ok_or(ResourceError::InvalidHandle(self.kind))
    }

    fn contains(&self, id: usize) -> bool {
        self.lock().contains_key(&id)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn with<R>(&self, id: usize, f: impl FnOnce(&mut T) -> R) -> Result<R, ResourceError> {
        self.lock()
            .get_mut(&id)
            .map(f)
            .ok_or(ResourceError::InvalidHandle(self.kind))
    }
}

fn create_failed(kind: ResourceKind, status: BackendStatus) -> ResourceError {
    ResourceError::BackendCreateFailed { kind, status }
}

/// A graphics device that keeps every object in memory.
///
/// Buffers and textures hold real bytes, so updates executed through a
/// [`HeadlessContext`](super::HeadlessContext) can be read back. Nothing is
/// ever presented; frames only advance the statistics.
#[derive(Debug)]
pub struct HeadlessDevice {
    buffers: Registry<HeadlessBufferEntry>,
    textures: Registry<HeadlessTextureEntry>,
    shaders: Registry<ShaderStage>,
    targets: Registry<TargetDescriptor>,
    draw_commands: Registry<HeadlessDrawEntry>,
    blend_states: Registry<BlendStateDesc>,
    depth_states: Registry<DepthStencilDesc>,
    raster_states: Registry<RasterStateDesc>,
    sampler_states: Registry<SamplerDesc>,

    next_id: AtomicUsize,

    // Memory tracking
    allocated_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,

    display: Mutex<DisplayConfig>,

    // Frame statistics
    in_frame: AtomicBool,
    frame_number: AtomicU64,
    draw_calls: AtomicU32,
    updates: AtomicU32,
    last_frame: Mutex<RenderStats>,
}

impl HeadlessDevice {
    /// Creates a device whose display starts with `display`.
    pub fn new(display: DisplayConfig) -> Self {
        let display = DisplayConfig {
            multisample_level: display.multisample_level.max(1),
            ..display
        };
        log::info!(
            "Headless device created ({}x{}, x{} MSAA)",
            display.resolution_w,
            display.resolution_h,
            display.multisample_level
        );
        Self {
            buffers: Registry::new(ResourceKind::Buffer),
            textures: Registry::new(ResourceKind::Texture),
            shaders: Registry::new(ResourceKind::Shader),
            targets: Registry::new(ResourceKind::Target),
            draw_commands: Registry::new(ResourceKind::DrawCommand),
            blend_states: Registry::new(ResourceKind::BlendState),
            depth_states: Registry::new(ResourceKind::DepthState),
            raster_states: Registry::new(ResourceKind::RasterState),
            sampler_states: Registry::new(ResourceKind::SamplerState),
            next_id: AtomicUsize::new(1),
            allocated_bytes: AtomicUsize::new(0),
            peak_bytes: AtomicUsize::new(0),
            display: Mutex::new(display),
            in_frame: AtomicBool::new(false),
            frame_number: AtomicU64::new(0),
            draw_calls: AtomicU32::new(0),
            updates: AtomicU32::new(0),
            last_frame: Mutex::new(RenderStats::default()),
        }
    }

    fn generate_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn track_allocation(&self, bytes: usize) {
        let total = self.allocated_bytes.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.peak_bytes.fetch_max(total, Ordering::Relaxed);
    }

    fn track_release(&self, bytes: usize) {
        self.allocated_bytes.fetch_sub(bytes, Ordering::Relaxed);
    }

    fn lock_display(&self) -> MutexGuard<'_, DisplayConfig> {
        self.display.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bytes currently held by buffers and textures.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes.load(Ordering::Relaxed)
    }

    /// The highest value [`allocated_bytes`](Self::allocated_bytes) reached.
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }

    /// Number of live objects of `kind`.
    pub fn live_count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Buffer => self.buffers.len(),
            ResourceKind::Texture => self.textures.len(),
            ResourceKind::Shader => self.shaders.len(),
            ResourceKind::Target => self.targets.len(),
            ResourceKind::DrawCommand => self.draw_commands.len(),
            ResourceKind::BlendState => self.blend_states.len(),
            ResourceKind::DepthState => self.depth_states.len(),
            ResourceKind::RasterState => self.raster_states.len(),
            ResourceKind::SamplerState => self.sampler_states.len(),
        }
    }

    /// A copy of the current contents of a buffer.
    pub fn buffer_contents(&self, handle: BufferHandle) -> Option<Vec<u8>> {
        self.buffers.with(handle.0, |entry| entry.data.clone()).ok()
    }

    /// A copy of one array slice of a texture.
    pub fn texture_slice(&self, handle: TextureHandle, index: u32) -> Option<Vec<u8>> {
        self.textures
            .with(handle.0, |entry| entry.slices.get(index as usize).cloned())
            .ok()
            .flatten()
    }

    pub(crate) fn write_buffer(
        &self,
        handle: BufferHandle,
        data: &[u8],
    ) -> Result<(), RenderError> {
        self.buffers.with(handle.0, |entry| {
            if data.len() > entry.data.len() {
                return Err(RenderError::Dispatch(format!(
                    "update of {} bytes overflows {:?} buffer of {} bytes",
                    data.len(),
                    entry.kind,
                    entry.data.len()
                )));
            }
            entry.data[..data.len()].copy_from_slice(data);
            Ok(())
        })??;
        self.updates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub(crate) fn write_texture(
        &self,
        handle: TextureHandle,
        index: u32,
        data: &[u8],
    ) -> Result<(), RenderError> {
        self.textures.with(handle.0, |entry| {
            let slice = entry.slices.get_mut(index as usize).ok_or_else(|| {
                RenderError::Dispatch(format!("texture has no array slice {index}"))
            })?;
            if data.len() > slice.len() {
                return Err(RenderError::Dispatch(format!(
                    "update of {} bytes overflows slice of {} bytes",
                    data.len(),
                    slice.len()
                )));
            }
            slice[..data.len()].copy_from_slice(data);
            Ok(())
        })??;
        self.updates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub(crate) fn resolve_texture(
        &self,
        source: TextureHandle,
        destination: TextureHandle,
    ) -> Result<(), RenderError> {
        let (descriptor, slices) = self.textures.with(source.0, |entry| {
            (entry.descriptor.clone(), entry.slices.clone())
        })?;
        if descriptor.multisampling <= 1 {
            return Err(RenderError::Dispatch(
                "resolve source is not multisampled".to_string(),
            ));
        }
        self.textures.with(destination.0, |entry| {
            let target = &entry.descriptor;
            if target.format != descriptor.format
                || target.width != descriptor.width
                || target.height != descriptor.height
            {
                return Err(RenderError::Dispatch(
                    "resolve source and destination differ in format or size".to_string(),
                ));
            }
            entry.slices = slices;
            Ok(())
        })??;
        self.updates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub(crate) fn check_target(&self, target: TargetHandle) -> Result<(), RenderError> {
        if target == DISPLAY_TARGET || self.targets.contains(target.0) {
            Ok(())
        } else {
            Err(ResourceError::InvalidHandle(ResourceKind::Target).into())
        }
    }

    pub(crate) fn record_draw(
        &self,
        target: TargetHandle,
        command: DrawCommandHandle,
    ) -> Result<(), RenderError> {
        self.check_target(target)?;
        if !self.draw_commands.contains(command.0) {
            return Err(ResourceError::InvalidHandle(ResourceKind::DrawCommand).into());
        }
        self.draw_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn check_attachment(
        &self,
        attachment: &TargetAttachment,
        usage: TextureUsage,
    ) -> Result<(), ResourceError> {
        let (has_usage, slice_count) = self
            .textures
            .with(attachment.texture.0, |entry| {
                (
                    entry.descriptor.usage.contains(usage),
                    entry.descriptor.slice_count(),
                )
            })
            .map_err(|_| create_failed(ResourceKind::Target, BackendStatus::InvalidResource))?;
        if !has_usage || attachment.index as usize >= slice_count {
            return Err(create_failed(
                ResourceKind::Target,
                BackendStatus::InvalidParameter,
            ));
        }
        Ok(())
    }

    fn check_bindings(&self, bindings: &DrawBindings) -> Result<(), ResourceError> {
        let missing = create_failed(ResourceKind::DrawCommand, BackendStatus::InvalidResource);

        if bindings.shaders.vertex.is_none() {
            return Err(create_failed(
                ResourceKind::DrawCommand,
                BackendStatus::InvalidParameter,
            ));
        }
        let shaders_live = ShaderStage::ALL
            .iter()
            .filter_map(|&stage| bindings.shaders.get(stage))
            .all(|shader| self.shaders.contains(shader.0));

        let mut buffers = bindings
            .constant_buffers
            .iter()
            .flatten()
            .copied()
            .chain(bindings.vertex_buffers.iter().flatten().map(|b| b.buffer))
            .chain(bindings.index_buffer);
        let buffers_live = buffers.all(|buffer| self.buffers.contains(buffer.0));

        let textures_live = bindings
            .textures
            .iter()
            .flatten()
            .all(|unit| self.textures.contains(unit.texture.0));

        if !(shaders_live && buffers_live && textures_live) {
            return Err(missing);
        }
        if bindings.mode.is_indexed() && bindings.index_buffer.is_none() {
            return Err(create_failed(
                ResourceKind::DrawCommand,
                BackendStatus::InvalidParameter,
            ));
        }
        Ok(())
    }
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new(DisplayConfig {
            resolution_w: 1280,
            resolution_h: 720,
            multisample_level: 1,
            fullscreen: false,
        })
    }
}

impl RenderDevice for HeadlessDevice {
    fn create_buffer(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferHandle, ResourceError> {
        if descriptor.size == 0 || data.len() > descriptor.size {
            return Err(create_failed(
                ResourceKind::Buffer,
                BackendStatus::InvalidParameter,
            ));
        }
        let mut contents = vec![0u8; descriptor.size];
        contents[..data.len()].copy_from_slice(data);

        let id = self.generate_id();
        self.buffers.insert(
            id,
            HeadlessBufferEntry {
                kind: descriptor.kind,
                data: contents,
            },
        );
        self.track_allocation(descriptor.size);
        log::trace!("Created {:?} buffer {id} ({} bytes)", descriptor.kind, descriptor.size);
        Ok(BufferHandle(id))
    }

    fn destroy_buffer(&self, handle: BufferHandle) -> Result<(), ResourceError> {
        let entry = self.buffers.remove(handle.0)?;
        self.track_release(entry.data.len());
        Ok(())
    }

    fn create_texture(
        &self,
        descriptor: &TextureDescriptor,
        slices: &[TextureSlice<'_>],
    ) -> Result<TextureHandle, ResourceError> {
        let invalid = |status| create_failed(ResourceKind::Texture, status);

        if descriptor.width == 0 {
            return Err(invalid(BackendStatus::InvalidParameter));
        }
        let depth = descriptor.format.is_depth();
        if (depth && descriptor.usage.contains(TextureUsage::RENDER_TARGET))
            || (!depth && descriptor.usage.contains(TextureUsage::DEPTH_TARGET))
            || (descriptor.use_mips && !self.supports_mip_generation(descriptor.format))
        {
            return Err(invalid(BackendStatus::InvalidTextureFormat));
        }

        let slice_count = descriptor.slice_count();
        let (slice_size, total) = descriptor
            .slice_size()
            .and_then(|size| Some((size, size.checked_mul(slice_count)?)))
            .ok_or_else(|| invalid(BackendStatus::InvalidParameter))?;
        let contents: Vec<Vec<u8>> = if slices.is_empty() {
            vec![vec![0u8; slice_size]; slice_count]
        } else {
            if slices.len() != slice_count || slices.iter().any(|s| s.data.len() < slice_size) {
                return Err(invalid(BackendStatus::InvalidParameter));
            }
            slices
                .iter()
                .map(|s| s.data[..slice_size].to_vec())
                .collect()
        };

        let id = self.generate_id();
        self.textures.insert(
            id,
            HeadlessTextureEntry {
                descriptor: descriptor.clone(),
                slices: contents,
            },
        );
        self.track_allocation(total);
        log::trace!(
            "Created {:?} texture {id} ({}x{})",
            descriptor.format,
            descriptor.width,
            descriptor.height
        );
        Ok(TextureHandle(id))
    }

    fn destroy_texture(&self, handle: TextureHandle) -> Result<(), ResourceError> {
        let entry = self.textures.remove(handle.0)?;
        self.track_release(entry.slices.iter().map(Vec::len).sum());
        Ok(())
    }

    fn supports_mip_generation(&self, format: TextureFormat) -> bool {
        !matches!(
            format,
            TextureFormat::ColourRgb
                | TextureFormat::Float3
                | TextureFormat::Depth16
                | TextureFormat::Depth32
        )
    }

    fn create_shader(
        &self,
        stage: ShaderStage,
        bytecode: &[u8],
    ) -> Result<ShaderHandle, ResourceError> {
        if bytecode.is_empty() {
            return Err(create_failed(
                ResourceKind::Shader,
                BackendStatus::InvalidShaderByteCode,
            ));
        }
        let id = self.generate_id();
        self.shaders.insert(id, stage);
        log::trace!("Created {stage:?} shader {id}");
        Ok(ShaderHandle(id))
    }

    fn destroy_shader(&self, handle: ShaderHandle) -> Result<(), ResourceError> {
        self.shaders.remove(handle.0).map(drop)
    }

    fn create_target(&self, descriptor: &TargetDescriptor) -> Result<TargetHandle, ResourceError> {
        if descriptor.render_textures.len() > MAX_RENDER_TEXTURES
            || (descriptor.render_textures.is_empty() && descriptor.depth_texture.is_none())
        {
            return Err(create_failed(
                ResourceKind::Target,
                BackendStatus::InvalidParameter,
            ));
        }
        for attachment in &descriptor.render_textures {
            self.check_attachment(attachment, TextureUsage::RENDER_TARGET)?;
        }
        if let Some(depth) = &descriptor.depth_texture {
            self.check_attachment(depth, TextureUsage::DEPTH_TARGET)?;
        }

        let id = self.generate_id();
        self.targets.insert(id, descriptor.clone());
        Ok(TargetHandle(id))
    }

    fn destroy_target(&self, handle: TargetHandle) -> Result<(), ResourceError> {
        self.targets.remove(handle.0).map(drop)
    }

    fn display_target(&self) -> TargetHandle {
        DISPLAY_TARGET
    }

    fn create_draw_command(
        &self,
        descriptor: &DrawCommandDesc<'_>,
    ) -> Result<DrawCommandHandle, ResourceError> {
        self.check_bindings(descriptor.bindings)?;

        let states_live = self.blend_states.contains(descriptor.blend_state.0)
            && self.raster_states.contains(descriptor.raster_state.0)
            && self.depth_states.contains(descriptor.depth_state.0)
            && descriptor
                .samplers
                .iter()
                .flatten()
                .all(|sampler| self.sampler_states.contains(sampler.0));
        if !states_live {
            return Err(create_failed(
                ResourceKind::DrawCommand,
                BackendStatus::InvalidResource,
            ));
        }

        let id = self.generate_id();
        self.draw_commands.insert(
            id,
            HeadlessDrawEntry {
                bindings: descriptor.bindings.clone(),
                samplers: descriptor.samplers,
            },
        );
        Ok(DrawCommandHandle(id))
    }

    fn destroy_draw_command(&self, handle: DrawCommandHandle) -> Result<(), ResourceError> {
        self.draw_commands.remove(handle.0).map(drop)
    }

    fn create_blend_state(
        &self,
        descriptor: &BlendStateDesc,
    ) -> Result<BlendStateHandle, ResourceError> {
        let id = self.generate_id();
        self.blend_states.insert(id, descriptor.clone());
        Ok(BlendStateHandle(id))
    }

    fn destroy_blend_state(&self, handle: BlendStateHandle) -> Result<(), ResourceError> {
        self.blend_states.remove(handle.0).map(drop)
    }

    fn create_depth_state(
        &self,
        descriptor: &DepthStencilDesc,
    ) -> Result<DepthStateHandle, ResourceError> {
        let id = self.generate_id();
        self.depth_states.insert(id, descriptor.clone());
        Ok(DepthStateHandle(id))
    }

    fn destroy_depth_state(&self, handle: DepthStateHandle) -> Result<(), ResourceError> {
        self.depth_states.remove(handle.0).map(drop)
    }

    fn create_raster_state(
        &self,
        descriptor: &RasterStateDesc,
    ) -> Result<RasterStateHandle, ResourceError> {
        let id = self.generate_id();
        self.raster_states.insert(id, descriptor.clone());
        Ok(RasterStateHandle(id))
    }

    fn destroy_raster_state(&self, handle: RasterStateHandle) -> Result<(), ResourceError> {
        self.raster_states.remove(handle.0).map(drop)
    }

    fn create_sampler_state(
        &self,
        descriptor: &SamplerDesc,
    ) -> Result<SamplerStateHandle, ResourceError> {
        let id = self.generate_id();
        self.sampler_states.insert(id, descriptor.clone());
        Ok(SamplerStateHandle(id))
    }

    fn destroy_sampler_state(&self, handle: SamplerStateHandle) -> Result<(), ResourceError> {
        self.sampler_states.remove(handle.0).map(drop)
    }

    fn display_config(&self) -> DisplayConfig {
        *self.lock_display()
    }

    fn set_display_config(&self, config: &DisplayConfig) -> Result<(), RenderError> {
        if config.resolution_w == 0 || config.resolution_h == 0 {
            return Err(ResourceError::Unsupported(format!(
                "{}x{} display",
                config.resolution_w, config.resolution_h
            ))
            .into());
        }
        let mut display = self.lock_display();
        let multisample_level = match config.multisample_level {
            0 => display.multisample_level,
            level => level,
        };
        *display = DisplayConfig {
            multisample_level,
            ..*config
        };
        log::debug!("Headless display reconfigured: {:?}", *display);
        Ok(())
    }

    fn draw_begin(&self) {
        if self.in_frame.swap(true, Ordering::AcqRel) {
            log::warn!("draw_begin called twice without draw_end");
        }
        self.draw_calls.store(0, Ordering::Relaxed);
        self.updates.store(0, Ordering::Relaxed);
    }

    fn draw_end(&self) {
        if !self.in_frame.swap(false, Ordering::AcqRel) {
            log::warn!("draw_end called without draw_begin");
        }
        let frame_number = self.frame_number.fetch_add(1, Ordering::Relaxed) + 1;
        let stats = RenderStats {
            frame_number,
            draw_calls: self.draw_calls.swap(0, Ordering::Relaxed),
            updates: self.updates.swap(0, Ordering::Relaxed),
        };
        *self.last_frame.lock().unwrap_or_else(PoisonError::into_inner) = stats;
    }

    fn stats(&self) -> RenderStats {
        *self.last_frame.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colour_texture(usage: TextureUsage) -> TextureDescriptor {
        TextureDescriptor {
            usage,
            width: 2,
            height: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_buffer_lifecycle_tracks_memory() {
        let device = HeadlessDevice::default();
        let descriptor = BufferDescriptor {
            kind: BufferKind::Constant,
            size: 16,
        };

        let handle = device.create_buffer(&descriptor, &[1, 2, 3, 4]).unwrap();
        assert_eq!(device.allocated_bytes(), 16);
        let contents = device.buffer_contents(handle).unwrap();
        assert_eq!(&contents[..4], &[1, 2, 3, 4]);
        assert!(contents[4..].iter().all(|&b| b == 0));

        device.destroy_buffer(handle).unwrap();
        assert_eq!(device.allocated_bytes(), 0);
        assert_eq!(device.peak_bytes(), 16);
        assert_eq!(
            device.destroy_buffer(handle),
            Err(ResourceError::InvalidHandle(ResourceKind::Buffer))
        );
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let device = HeadlessDevice::default();
        let err = device
            .create_buffer(
                &BufferDescriptor {
                    kind: BufferKind::Vertex,
                    size: 0,
                },
                &[],
            )
            .unwrap_err();
        assert_eq!(
            err,
            ResourceError::BackendCreateFailed {
                kind: ResourceKind::Buffer,
                status: BackendStatus::InvalidParameter
            }
        );
    }

    #[test]
    fn test_depth_format_cannot_be_a_colour_target() {
        let device = HeadlessDevice::default();
        let descriptor = TextureDescriptor {
            format: TextureFormat::Depth32,
            ..colour_texture(TextureUsage::RENDER_TARGET)
        };
        assert!(matches!(
            device.create_texture(&descriptor, &[]),
            Err(ResourceError::BackendCreateFailed {
                status: BackendStatus::InvalidTextureFormat,
                ..
            })
        ));
    }

    #[test]
    fn test_overflowing_texture_dimensions_are_rejected() {
        let device = HeadlessDevice::default();
        let descriptor = TextureDescriptor {
            width: 1 << 30,
            height: 1 << 20,
            ..colour_texture(TextureUsage::RENDER_TARGET)
        };
        assert!(matches!(
            device.create_texture(&descriptor, &[]),
            Err(ResourceError::BackendCreateFailed {
                status: BackendStatus::InvalidParameter,
                ..
            })
        ));
        assert_eq!(device.allocated_bytes(), 0);
    }

    #[test]
    fn test_target_needs_live_attachments_with_matching_usage() {
        let device = HeadlessDevice::default();
        let colour = device
            .create_texture(&colour_texture(TextureUsage::RENDER_TARGET), &[])
            .unwrap();
        let sampled = device
            .create_texture(&colour_texture(TextureUsage::SHADER_RESOURCE), &[])
            .unwrap();

        let attach = |texture| TargetDescriptor {
            render_textures: vec![TargetAttachment { texture, index: 0 }],
            depth_texture: None,
        };

        let target = device.create_target(&attach(colour)).unwrap();
        assert_ne!(target, DISPLAY_TARGET);
        assert!(device.create_target(&attach(sampled)).is_err());
        assert!(device.create_target(&attach(TextureHandle(999))).is_err());
        assert!(device.create_target(&TargetDescriptor::default()).is_err());
    }

    #[test]
    fn test_zero_multisample_level_keeps_the_current_one() {
        let device = HeadlessDevice::default();
        device
            .set_display_config(&DisplayConfig {
                resolution_w: 640,
                resolution_h: 480,
                multisample_level: 0,
                fullscreen: true,
            })
            .unwrap();

        let config = device.display_config();
        assert_eq!((config.resolution_w, config.resolution_h), (640, 480));
        assert_eq!(config.multisample_level, 1);
        assert!(config.fullscreen);
    }

    #[test]
    fn test_zero_resolution_is_rejected() {
        let device = HeadlessDevice::default();
        let before = device.display_config();
        assert!(device
            .set_display_config(&DisplayConfig {
                resolution_w: 0,
                ..before
            })
            .is_err());
        assert_eq!(device.display_config(), before);
    }

    #[test]
    fn test_frames_advance_statistics() {
        let device = HeadlessDevice::default();
        assert_eq!(device.stats().frame_number, 0);

        device.draw_begin();
        device.draw_end();
        device.draw_begin();
        device.draw_end();

        assert_eq!(device.stats().frame_number, 2);
        assert_eq!(device.stats().draw_calls, 0);
    }
}
