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

mod common;

use common::{ContextCall, MockGraphicsDevice, MockRenderContext, MockSurface};
use std::sync::Arc;
use vitrum_core::asset::{Container, ShaderContainer, ShaderStageBlob};
use vitrum_core::config::GraphicsConfig;
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{RenderDevice, ResourceKind};
use vitrum_core::vfs::MemoryFileSource;
use vitrum_graphics::{FlushReport, GraphicsSystem};

struct Harness {
    system: GraphicsSystem,
    device: Arc<MockGraphicsDevice>,
    context: MockRenderContext,
    surface: MockSurface,
}

fn harness_with(source: MemoryFileSource) -> Harness {
    let config = GraphicsConfig {
        root_path: "/assets".into(),
        ..Default::default()
    };
    let device = MockGraphicsDevice::with_display(DisplayConfig {
        resolution_w: 1280,
        resolution_h: 720,
        multisample_level: 1,
        fullscreen: false,
    });
    let context = MockRenderContext::default();
    let surface = MockSurface::sized(1280, 720);

    let system = GraphicsSystem::with_file_source(
        config,
        device.clone(),
        Box::new(context.clone()),
        Box::new(surface.clone()),
        Arc::new(source),
    )
    .unwrap();

    Harness {
        system,
        device,
        context,
        surface,
    }
}

fn harness() -> Harness {
    harness_with(MemoryFileSource::new())
}

#[test]
fn test_matching_initial_display_changes_nothing() {
    let h = harness();
    assert!(h.device.display_calls().is_empty());
    assert!(h.surface.state.lock().unwrap().resizes.is_empty());
}

#[test]
fn test_frame_clears_then_presents() {
    let mut h = harness();

    h.system.begin().unwrap();
    assert_eq!(
        h.context.calls(),
        vec![
            ContextCall::ClearColour(TargetHandle(0), [0.0, 0.0, 0.0, 1.0]),
            ContextCall::ClearDepth(TargetHandle(0), 1.0),
        ]
    );

    h.system.end();
    assert_eq!(h.context.calls().last(), Some(&ContextCall::Finish));
    assert_eq!(h.system.stats().frame_number, 1);
}

#[test]
fn test_fullscreen_to_borderless_passes_through_windowed() {
    let mut h = harness();

    h.system.set_display_mode(DisplayMode::Fullscreen);
    h.system.begin().unwrap();
    assert!(h.device.display_config().fullscreen);

    h.system.set_display_mode(DisplayMode::Borderless);
    h.system.begin().unwrap();

    let calls = h.device.display_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].fullscreen);
    assert!(!calls[1].fullscreen);
    assert_eq!(h.surface.state.lock().unwrap().borderless_calls, vec![true]);
    assert!(!h.device.display_config().fullscreen);
}

#[test]
fn test_windowed_resolution_change_resizes_the_surface() {
    let mut h = harness();

    h.system.set_display_resolution(800, 600);
    assert!(h.system.display_controller().is_dirty());
    h.system.begin().unwrap();

    assert_eq!(h.surface.state.lock().unwrap().resizes, vec![(800, 600)]);
    assert_eq!(
        h.device.display_calls(),
        vec![DisplayConfig {
            resolution_w: 800,
            resolution_h: 600,
            multisample_level: 0,
            fullscreen: false,
        }]
    );
    assert!(!h.system.display_controller().is_dirty());

    h.system.begin().unwrap();
    assert_eq!(h.device.display_calls().len(), 1);
}

#[test]
fn test_multisample_change_keeps_resolution() {
    let mut h = harness();

    h.system.display_controller().set_multisample_level(4);
    h.system.begin().unwrap();

    assert_eq!(
        h.device.display_calls(),
        vec![DisplayConfig {
            resolution_w: 1280,
            resolution_h: 720,
            multisample_level: 4,
            fullscreen: false,
        }]
    );
    assert!(h.surface.state.lock().unwrap().resizes.is_empty());
}

#[test]
fn test_compiled_draws_share_state_objects() {
    let mut h = harness();

    let mut command = DrawCommand::default();
    command.samplers[0] = SamplerState {
        enabled: true,
        ..Default::default()
    };

    let first = h.system.compile_draw(&command).unwrap();
    let second = h.system.compile_draw(&command).unwrap();
    assert_ne!(first.handle(), second.handle());

    assert_eq!(h.device.created(ResourceKind::DrawCommand), 2);
    assert_eq!(h.device.created(ResourceKind::BlendState), 1);
    assert_eq!(h.device.created(ResourceKind::RasterState), 1);
    assert_eq!(h.device.created(ResourceKind::DepthState), 1);
    assert_eq!(h.device.created(ResourceKind::SamplerState), 1);

    drop(first);
    assert_eq!(h.device.destroyed(ResourceKind::DrawCommand), 1);
    assert_eq!(h.device.destroyed(ResourceKind::BlendState), 0);
}

#[test]
fn test_disabled_samplers_are_not_created() {
    let mut h = harness();

    let _draw = h.system.compile_draw(&DrawCommand::default()).unwrap();
    assert_eq!(h.device.created(ResourceKind::SamplerState), 0);
}

#[test]
fn test_loads_requested_from_another_thread_are_served_by_begin() {
    let program = ShaderContainer {
        stages: vec![ShaderStageBlob::new(ShaderStage::Vertex, b"vs_main")],
    };
    let source =
        MemoryFileSource::new().with_file("/assets/basic.shader", program.encode().unwrap());
    let mut h = harness_with(source);

    let loader = h.system.loader();
    let (shader, missing) = std::thread::spawn(move || {
        (
            loader.load_shader("basic").unwrap(),
            loader.load_shader("absent").unwrap(),
        )
    })
    .join()
    .unwrap();

    assert!(shader.try_recv().is_err());
    h.system.begin().unwrap();

    let id = shader.recv().unwrap().unwrap();
    assert!(h.system.shaders().program(id).is_ok());
    assert!(missing.recv().unwrap().is_err());
}

#[test]
fn test_execute_flushes_recorded_updates() {
    let mut h = harness();
    let buffer = h.system.buffers_mut().create_constant(&[0u32; 4]).unwrap();
    let handle = h.system.buffers().handle(buffer).unwrap();

    let mut queue = h.system.create_command_queue();
    let mut batch = queue.create_batch();
    h.system
        .buffers()
        .update_constant(&mut batch, buffer, &[7u32; 4])
        .unwrap();
    queue.submit_batch(0, batch);

    let report = h.system.execute(&mut queue);
    assert_eq!(
        report,
        FlushReport {
            batches: 1,
            dispatched: 1,
            failed: 0
        }
    );
    assert!(matches!(
        h.context.calls().as_slice(),
        [ContextCall::BufferUpdate(updated, data)] if *updated == handle && data.len() == 16
    ));
}

#[test]
fn test_dropping_the_system_releases_resources() {
    let Harness {
        mut system, device, ..
    } = harness();
    system.buffers_mut().create_index(&[0, 1, 2]).unwrap();
    system
        .textures_mut()
        .create(
            &TextureDescriptor {
                usage: TextureUsage::RENDER_TARGET,
                width: 4,
                height: 4,
                ..Default::default()
            },
            &[],
        )
        .unwrap();

    drop(system);
    assert_eq!(device.destroyed(ResourceKind::Buffer), 1);
    assert_eq!(device.destroyed(ResourceKind::Texture), 1);
}
