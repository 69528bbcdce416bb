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

// Vitrum Sandbox
// Renders a few frames of a rotating triangle on the headless backend.

use std::sync::Arc;

use anyhow::{Context, Result};
use vitrum_core::asset::{Container, ImageContainer, ShaderContainer, ShaderStageBlob};
use vitrum_core::config::GraphicsConfig;
use vitrum_core::renderer::api::*;
use vitrum_core::vfs::MemoryFileSource;
use vitrum_graphics::managers::TextureLoadFlags;
use vitrum_graphics::{DrawBuilder, GraphicsSystem, VertexBuilder};
use vitrum_infra::{HeadlessContext, HeadlessDevice, HeadlessSurface};

const FRAMES: u32 = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Constants {
    rotation: [f32; 4],
    tint: [f32; 4],
}

/// The files a real application would ship next to the binary.
fn sandbox_assets(root: &str) -> Result<MemoryFileSource> {
    let shader = ShaderContainer {
        stages: vec![
            ShaderStageBlob::new(ShaderStage::Vertex, b"sandbox_vs"),
            ShaderStageBlob::new(ShaderStage::Pixel, b"sandbox_ps"),
        ],
    };

    let descriptor = TextureDescriptor {
        width: 2,
        height: 2,
        ..Default::default()
    };
    let checker: Vec<u8> = [255u8, 0, 0, 255, 0, 0, 0, 255]
        .iter()
        .chain(&[0, 0, 0, 255, 255, 0, 0, 255])
        .copied()
        .collect();
    let image = ImageContainer {
        descriptor,
        slices: vec![checker],
    };

    Ok(MemoryFileSource::new()
        .with_file(format!("{root}/sandbox.shader"), shader.encode()?)
        .with_file(format!("{root}/checker.tex"), image.encode()?))
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GraphicsConfig::load(path)?,
        None => GraphicsConfig {
            root_path: "/sandbox".into(),
            ..Default::default()
        },
    };
    let root = config.root_path.display().to_string();
    let display = config.display;

    let device = Arc::new(HeadlessDevice::new(DisplayConfig {
        resolution_w: display.width,
        resolution_h: display.height,
        multisample_level: display.multisample_level,
        fullscreen: display.mode == DisplayMode::Fullscreen,
    }));
    let mut system = GraphicsSystem::with_file_source(
        config,
        device.clone(),
        Box::new(HeadlessContext::new(device.clone())),
        Box::new(HeadlessSurface::new(display.width, display.height)),
        Arc::new(sandbox_assets(&root)?),
    )?;

    // Textures are requested from a worker thread and served by the next frame.
    let loader = system.loader();
    let texture_reply = std::thread::spawn(move || {
        loader.load_texture("checker.tex", TextureLoadFlags::GEN_MIPS)
    })
    .join()
    .map_err(|_| anyhow::anyhow!("Loader thread panicked"))??;

    let shader = system.shaders_mut().load("sandbox")?;

    let mut vertices = VertexBuilder::begin(3);
    vertices
        .set_attribute(
            "POSITION",
            VertexAttributeType::Float3,
            &[[0.0f32, 0.5, 0.0], [-0.5, -0.5, 0.0], [0.5, -0.5, 0.0]],
        )?
        .set_attribute(
            "COLOR",
            VertexAttributeType::Float3,
            &[[1.0f32, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        )?
        .set_index_stream(&[0, 1, 2]);
    let mesh = system.meshes_mut().create(&vertices.end()?)?;

    let constants = Constants {
        rotation: [0.0; 4],
        tint: [1.0; 4],
    };
    let constant_buffer = system.buffers_mut().create_constant(&constants)?;

    let viewport = Viewport::full(display.width, display.height);
    let mut draw = None;

    for frame in 0..FRAMES {
        if frame == 2 {
            system.set_display_mode(DisplayMode::Borderless);
        }
        system.begin()?;

        if draw.is_none() {
            let texture = texture_reply
                .recv()
                .context("Texture request was dropped")??;

            let mut builder = DrawBuilder::new();
            builder
                .set_shader(system.shaders(), shader)?
                .set_mesh(system.meshes(), mesh)?
                .set_constant_buffer(system.buffers(), 0, constant_buffer)?
                .set_texture(system.textures(), 0, texture)?
                .set_texture_sampler(
                    0,
                    SamplerState {
                        enabled: true,
                        filtering: Filtering::Trilinear,
                        ..Default::default()
                    },
                )?;
            draw = Some(system.compile_draw(&builder.build()?)?);
        }

        let angle = frame as f32 * std::f32::consts::FRAC_PI_4;
        let constants = Constants {
            rotation: [angle.cos(), angle.sin(), 0.0, 0.0],
            ..constants
        };

        let mut queue = system.create_command_queue();
        let mut batch = queue.create_batch();
        system
            .buffers()
            .update_constant(&mut batch, constant_buffer, &constants)?;
        if let Some(draw) = &draw {
            draw.record(&mut batch, system.display_target(), viewport, viewport);
        }
        queue.submit_batch(0, batch);

        let report = system.execute(&mut queue);
        if !report.is_clean() {
            log::warn!("Frame {frame}: {} commands failed", report.failed);
        }
        system.end();

        let stats = system.stats();
        log::info!(
            "Frame {}: {} draw calls, {} updates, {} bytes allocated",
            stats.frame_number,
            stats.draw_calls,
            stats.updates,
            device.allocated_bytes()
        );
    }

    drop(draw);
    Ok(())
}
