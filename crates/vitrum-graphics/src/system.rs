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

//! The graphics system: frame lifecycle, draw compilation and resource ownership.

use crate::command::{Command, CommandBatch, CommandQueue, FlushReport};
use crate::display::{reconcile_display, DisplayController};
use crate::loader::{LoadQueue, LoaderHandle};
use crate::managers::{BufferManager, FileResolver, MeshManager, ShaderManager, TextureManager};
use crate::state::{SharedState, StateManager};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vitrum_core::config::GraphicsConfig;
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{GpuResource, RenderContext, RenderDevice, RenderError, RenderSurface};
use vitrum_core::vfs::{DiskFileSource, FileSource};

/// A draw call compiled by the backend.
///
/// Holds references to the state objects the draw uses, so they outlive it.
/// Dropping the value destroys the backend draw command.
#[derive(Debug)]
pub struct CompiledDraw {
    command: GpuResource<DrawCommandHandle>,
    _blend: SharedState<BlendStateHandle>,
    _raster: SharedState<RasterStateHandle>,
    _depth: SharedState<DepthStateHandle>,
    _samplers: Vec<SharedState<SamplerStateHandle>>,
}

impl CompiledDraw {
    /// The backend draw command.
    pub fn handle(&self) -> DrawCommandHandle {
        self.command.handle()
    }

    /// Records a draw of this command into `batch`.
    pub fn record(
        &self,
        batch: &mut CommandBatch,
        target: TargetHandle,
        viewport: Viewport,
        scissor: Scissor,
    ) {
        batch.push(
            Command::Draw {
                target,
                draw: self.handle(),
                viewport,
                scissor,
            },
            None,
        );
    }
}

/// Owns the rendering backend and every resource created through it.
#[derive(Debug)]
pub struct GraphicsSystem {
    config: GraphicsConfig,
    display: DisplayController,
    loads: LoadQueue,
    states: StateManager,
    textures: TextureManager,
    shaders: ShaderManager,
    meshes: MeshManager,
    buffers: BufferManager,
    surface: Box<dyn RenderSurface>,
    context: Box<dyn RenderContext>,
    device: Arc<dyn RenderDevice>,
}

impl GraphicsSystem {
    /// Creates a system reading resources from the local disk.
    ///
    /// ## Arguments
    /// * `config` - Initial display options, resource root and table sizes.
    /// * `device` - The backend device.
    /// * `context` - The primary context commands are executed on.
    /// * `surface` - The window the display presents to.
    pub fn new(
        config: GraphicsConfig,
        device: Arc<dyn RenderDevice>,
        context: Box<dyn RenderContext>,
        surface: Box<dyn RenderSurface>,
    ) -> Result<Self, RenderError> {
        Self::with_file_source(config, device, context, surface, Arc::new(DiskFileSource))
    }

    /// Creates a system reading resources through `source`.
    ///
    /// The initial display mode is applied before returning.
    pub fn with_file_source(
        config: GraphicsConfig,
        device: Arc<dyn RenderDevice>,
        context: Box<dyn RenderContext>,
        mut surface: Box<dyn RenderSurface>,
        source: Arc<dyn FileSource>,
    ) -> Result<Self, RenderError> {
        let files = FileResolver::new(source, &config.root_path);
        let min_free = config.min_free_indices;

        if config.display.mode == DisplayMode::Borderless {
            surface.enable_borderless(true);
        }

        let mut system = Self {
            display: DisplayController::new(config.display),
            loads: LoadQueue::new(),
            states: StateManager::new(Arc::clone(&device)),
            textures: TextureManager::new(Arc::clone(&device), files.clone())
                .with_min_free_indices(min_free),
            shaders: ShaderManager::new(Arc::clone(&device), files.clone())
                .with_min_free_indices(min_free),
            meshes: MeshManager::new(Arc::clone(&device), files).with_min_free_indices(min_free),
            buffers: BufferManager::new(Arc::clone(&device)).with_min_free_indices(min_free),
            surface,
            context,
            device,
            config,
        };

        if system.config.display.mode != DisplayMode::Windowed {
            system.refresh_display();
        }
        system.rebuild_display()?;

        log::info!(
            "Graphics system initialized (root '{}')",
            system.config.root_path.display()
        );
        Ok(system)
    }

    fn rebuild_display(&mut self) -> Result<(), RenderError> {
        match self.display.take_pending() {
            Some(options) => {
                reconcile_display(self.device.as_ref(), self.surface.as_mut(), &options)
            }
            None => Ok(()),
        }
    }

    /// Starts a frame.
    ///
    /// Applies pending display changes, serves queued load requests and
    /// clears the display target.
    pub fn begin(&mut self) -> Result<(), RenderError> {
        if let Err(err) = self.rebuild_display() {
            log::warn!("Failed to apply display options: {err}");
        }
        self.process_load_requests();

        self.device.draw_begin();

        let target = self.device.display_target();
        self.context.clear_colour_target(target, self.config.clear_colour)?;
        self.context.clear_depth_target(target, 1.0)?;
        Ok(())
    }

    /// Ends the frame and presents it.
    pub fn end(&mut self) {
        self.context.finish();
        self.device.draw_end();
    }

    /// Flushes `queue` on the primary context.
    pub fn execute(&mut self, queue: &mut CommandQueue) -> FlushReport {
        queue.flush(self.context.as_mut())
    }

    /// Creates an empty queue sized by the configuration.
    pub fn create_command_queue(&self) -> CommandQueue {
        CommandQueue::with_capacity(self.config.command_queue_capacity)
    }

    /// Resolves the state of `command` and compiles it on the backend.
    ///
    /// Samplers are only bound for enabled slots.
    pub fn compile_draw(&mut self, command: &DrawCommand) -> Result<CompiledDraw, RenderError> {
        let blend = self.states.demand_blend(&command.blend_state)?;
        let raster = self.states.demand_raster(&command.raster_state)?;
        let depth = self.states.demand_depth(&command.depth_state)?;

        let mut samplers = Vec::new();
        let mut sampler_handles = [None; MAX_SAMPLER_SLOTS];
        for (slot, sampler) in command.samplers.iter().enumerate() {
            if sampler.enabled {
                let state = self.states.demand_sampler(sampler)?;
                sampler_handles[slot] = Some(state.handle());
                samplers.push(state);
            }
        }

        let desc = DrawCommandDesc {
            bindings: &command.bindings,
            blend_state: blend.handle(),
            raster_state: raster.handle(),
            depth_state: depth.handle(),
            samplers: sampler_handles,
        };
        let handle = self.device.create_draw_command(&desc)?;

        Ok(CompiledDraw {
            command: GpuResource::new(Arc::clone(&self.device), handle),
            _blend: blend,
            _raster: raster,
            _depth: depth,
            _samplers: samplers,
        })
    }

    /// Requests a new display resolution, applied at the next [`begin`](Self::begin).
    pub fn set_display_resolution(&self, width: u32, height: u32) {
        self.display.set_resolution(width, height);
    }

    /// Requests a new display mode, applied at the next [`begin`](Self::begin).
    pub fn set_display_mode(&self, mode: DisplayMode) {
        self.display.set_mode(mode);
    }

    /// Requests a new multisample level, applied at the next [`begin`](Self::begin).
    pub fn set_display_multisample_level(&self, level: u32) {
        self.display.set_multisample_level(level);
    }

    /// Takes the desired resolution from the surface's current size.
    ///
    /// Call after the window was resized by the user.
    pub fn refresh_display(&mut self) {
        let (width, height) = self.surface.size();
        self.display.set_resolution(width, height);
    }

    /// A handle other threads can use to change display options.
    pub fn display_controller(&self) -> DisplayController {
        self.display.clone()
    }

    /// The desired display options.
    pub fn display_options(&self) -> DisplayOptions {
        self.display.options()
    }

    /// The render target presenting to the display.
    pub fn display_target(&self) -> TargetHandle {
        self.device.display_target()
    }

    /// The directory resources are loaded from.
    pub fn root_path(&self) -> &Path {
        &self.config.root_path
    }

    /// Changes the directory every manager loads resources from.
    pub fn set_root_path(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();
        self.textures.set_root_path(&root);
        self.shaders.set_root_path(&root);
        self.meshes.set_root_path(&root);
        self.config.root_path = root;
    }

    /// Statistics of the last completed frame.
    pub fn stats(&self) -> RenderStats {
        self.device.stats()
    }

    /// A handle for requesting loads from other threads.
    pub fn loader(&self) -> LoaderHandle {
        self.loads.handle()
    }

    /// Serves queued load requests now rather than at the next frame.
    pub fn process_load_requests(&mut self) -> usize {
        self.loads.drain(&mut self.textures, &mut self.shaders)
    }

    /// The backend device.
    pub fn device(&self) -> &Arc<dyn RenderDevice> {
        &self.device
    }

    /// The state object caches.
    pub fn states(&self) -> &StateManager {
        &self.states
    }

    /// The texture manager.
    pub fn textures(&self) -> &TextureManager {
        &self.textures
    }

    /// The texture manager, for loading and destroying.
    pub fn textures_mut(&mut self) -> &mut TextureManager {
        &mut self.textures
    }

    /// The shader manager.
    pub fn shaders(&self) -> &ShaderManager {
        &self.shaders
    }

    /// The shader manager, for loading and destroying.
    pub fn shaders_mut(&mut self) -> &mut ShaderManager {
        &mut self.shaders
    }

    /// The mesh manager.
    pub fn meshes(&self) -> &MeshManager {
        &self.meshes
    }

    /// The mesh manager, for creating and destroying.
    pub fn meshes_mut(&mut self) -> &mut MeshManager {
        &mut self.meshes
    }

    /// The buffer manager.
    pub fn buffers(&self) -> &BufferManager {
        &self.buffers
    }

    /// The buffer manager, for creating and destroying.
    pub fn buffers_mut(&mut self) -> &mut BufferManager {
        &mut self.buffers
    }

    /// Releases every resource owned by the managers and caches.
    ///
    /// Compiled draws held by the caller keep their own objects alive.
    pub fn shutdown(&mut self) {
        self.textures.clear();
        self.shaders.clear();
        self.meshes.clear();
        self.buffers.clear();
        self.states.clear();
        log::info!("Graphics system shut down");
    }
}

impl Drop for GraphicsSystem {
    fn drop(&mut self) {
        self.shutdown();
    }
}
