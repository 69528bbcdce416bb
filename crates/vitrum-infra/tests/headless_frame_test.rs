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

use std::sync::Arc;
use vitrum_core::asset::{Container, ShaderContainer, ShaderStageBlob};
use vitrum_core::config::GraphicsConfig;
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{RenderDevice, ResourceKind};
use vitrum_core::vfs::MemoryFileSource;
use vitrum_graphics::{DrawBuilder, GraphicsSystem, VertexBuilder};
use vitrum_infra::{HeadlessContext, HeadlessDevice, HeadlessSurface};

fn system(device: &Arc<HeadlessDevice>) -> GraphicsSystem {
    let program = ShaderContainer {
        stages: vec![
            ShaderStageBlob::new(ShaderStage::Vertex, b"vs"),
            ShaderStageBlob::new(ShaderStage::Pixel, b"ps"),
        ],
    };
    let files = MemoryFileSource::new().with_file("/assets/flat.shader", program.encode().unwrap());
    let config = GraphicsConfig {
        root_path: "/assets".into(),
        ..Default::default()
    };

    GraphicsSystem::with_file_source(
        config,
        device.clone(),
        Box::new(HeadlessContext::new(Arc::clone(device))),
        Box::new(HeadlessSurface::new(1280, 720)),
        Arc::new(files),
    )
    .unwrap()
}

#[test]
fn test_one_frame_draws_a_triangle() {
    let device = Arc::new(HeadlessDevice::default());
    let mut system = system(&device);

    let shader = system.shaders_mut().load("flat").unwrap();
    let mut vertices = VertexBuilder::begin(3);
    vertices
        .set_attribute(
            "POSITION",
            VertexAttributeType::Float2,
            &[0.0f32, 0.5, -0.5, -0.5, 0.5, -0.5],
        )
        .unwrap();
    vertices.set_index_stream(&[0, 1, 2]);
    let mesh = system.meshes_mut().create(&vertices.end().unwrap()).unwrap();
    let constants = system.buffers_mut().create_constant(&[0.0f32; 4]).unwrap();

    let mut builder = DrawBuilder::new();
    builder
        .set_shader(system.shaders(), shader)
        .unwrap()
        .set_mesh(system.meshes(), mesh)
        .unwrap()
        .set_constant_buffer(system.buffers(), 0, constants)
        .unwrap();
    let draw = system.compile_draw(&builder.build().unwrap()).unwrap();

    system.begin().unwrap();
    let mut queue = system.create_command_queue();
    let mut batch = queue.create_batch();
    system
        .buffers()
        .update_constant(&mut batch, constants, &[1.0f32; 4])
        .unwrap();
    let full = Viewport::full(1280, 720);
    draw.record(&mut batch, system.display_target(), full, full);
    queue.submit_batch(0, batch);

    let report = system.execute(&mut queue);
    assert!(report.is_clean());
    system.end();

    let stats = system.stats();
    assert_eq!(stats.frame_number, 1);
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.updates, 1);

    let handle = system.buffers().handle(constants).unwrap();
    let contents = device.buffer_contents(handle).unwrap();
    let ones: Vec<u8> = [1.0f32; 4].iter().flat_map(|f| f.to_ne_bytes()).collect();
    assert_eq!(contents, ones);
}

#[test]
fn test_shutdown_leaves_only_caller_owned_objects() {
    let device = Arc::new(HeadlessDevice::default());
    let mut system = system(&device);

    system.shaders_mut().load("flat").unwrap();
    system.buffers_mut().create_index(&[0, 1, 2]).unwrap();
    assert_eq!(device.live_count(ResourceKind::Shader), 2);

    drop(system);
    assert_eq!(device.live_count(ResourceKind::Shader), 0);
    assert_eq!(device.live_count(ResourceKind::Buffer), 0);
    assert_eq!(device.allocated_bytes(), 0);
}

#[test]
fn test_display_changes_reach_the_device() {
    let device = Arc::new(HeadlessDevice::default());
    let mut system = system(&device);

    system.set_display_mode(DisplayMode::Fullscreen);
    system.set_display_resolution(1920, 1080);
    system.begin().unwrap();
    system.end();

    let config = device.display_config();
    assert!(config.fullscreen);
    assert_eq!((config.resolution_w, config.resolution_h), (1920, 1080));
}
