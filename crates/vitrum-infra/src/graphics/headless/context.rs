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

use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{RenderContext, RenderError};

use super::device::HeadlessDevice;

/// Executes commands directly against a [`HeadlessDevice`].
#[derive(Debug)]
pub struct HeadlessContext {
    device: Arc<HeadlessDevice>,
    executed: usize,
    last_clear: Option<[f32; 4]>,
}

impl HeadlessContext {
    /// Creates a context executing on `device`.
    pub fn new(device: Arc<HeadlessDevice>) -> Self {
        Self {
            device,
            executed: 0,
            last_clear: None,
        }
    }

    /// The colour of the most recent colour clear.
    pub fn last_clear_colour(&self) -> Option<[f32; 4]> {
        self.last_clear
    }

    fn executed<T>(&mut self, result: Result<T, RenderError>) -> Result<T, RenderError> {
        if result.is_ok() {
            self.executed += 1;
        }
        result
    }
}

impl RenderContext for HeadlessContext {
    fn buffer_update(&mut self, buffer: BufferHandle, data: &[u8]) -> Result<(), RenderError> {
        let result = self.device.write_buffer(buffer, data);
        self.executed(result)
    }

    fn texture_update(
        &mut self,
        texture: TextureHandle,
        index: u32,
        data: &[u8],
    ) -> Result<(), RenderError> {
        let result = self.device.write_texture(texture, index, data);
        self.executed(result)
    }

    fn texture_resolve(
        &mut self,
        source: TextureHandle,
        destination: TextureHandle,
    ) -> Result<(), RenderError> {
        let result = self.device.resolve_texture(source, destination);
        self.executed(result)
    }

    fn clear_colour_target(
        &mut self,
        target: TargetHandle,
        colour: [f32; 4],
    ) -> Result<(), RenderError> {
        self.device.check_target(target)?;
        self.last_clear = Some(colour);
        self.executed(Ok(()))
    }

    fn clear_depth_target(&mut self, target: TargetHandle, _depth: f32) -> Result<(), RenderError> {
        let result = self.device.check_target(target);
        self.executed(result)
    }

    fn draw(
        &mut self,
        target: TargetHandle,
        command: DrawCommandHandle,
        viewport: Viewport,
        _scissor: Scissor,
    ) -> Result<(), RenderError> {
        if viewport.w == 0 || viewport.h == 0 {
            log::trace!("Skipping draw {command:?} with an empty viewport");
            return Ok(());
        }
        let result = self.device.record_draw(target, command);
        self.executed(result)
    }

    fn finish(&mut self) {
        log::trace!("Headless context finished {} commands", self.executed);
        self.executed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrum_core::renderer::{RenderDevice, ResourceError, ResourceKind};

    fn setup() -> (Arc<HeadlessDevice>, HeadlessContext) {
        let device = Arc::new(HeadlessDevice::default());
        let context = HeadlessContext::new(Arc::clone(&device));
        (device, context)
    }

    #[test]
    fn test_buffer_update_is_visible_on_the_device() {
        let (device, mut context) = setup();
        let buffer = device
            .create_buffer(
                &BufferDescriptor {
                    kind: BufferKind::Constant,
                    size: 4,
                },
                &[0; 4],
            )
            .unwrap();

        context.buffer_update(buffer, &[9, 8]).unwrap();
        assert_eq!(device.buffer_contents(buffer).unwrap(), vec![9, 8, 0, 0]);

        assert!(matches!(
            context.buffer_update(buffer, &[0; 5]),
            Err(RenderError::Dispatch(_))
        ));
        assert!(matches!(
            context.buffer_update(BufferHandle(999), &[0]),
            Err(RenderError::Resource(ResourceError::InvalidHandle(
                ResourceKind::Buffer
            )))
        ));
    }

    #[test]
    fn test_texture_update_targets_one_slice() {
        let (device, mut context) = setup();
        let descriptor = TextureDescriptor {
            format: TextureFormat::Byte,
            width: 2,
            height: 1,
            array_size: 2,
            ..Default::default()
        };
        let texture = device
            .create_texture(
                &descriptor,
                &[
                    TextureSlice {
                        data: &[1, 1],
                        row_pitch: 2,
                        depth_pitch: 2,
                    },
                    TextureSlice {
                        data: &[2, 2],
                        row_pitch: 2,
                        depth_pitch: 2,
                    },
                ],
            )
            .unwrap();

        context.texture_update(texture, 1, &[7, 7]).unwrap();
        assert_eq!(device.texture_slice(texture, 0).unwrap(), vec![1, 1]);
        assert_eq!(device.texture_slice(texture, 1).unwrap(), vec![7, 7]);
        assert!(context.texture_update(texture, 2, &[0]).is_err());
    }

    #[test]
    fn test_resolve_requires_a_multisampled_source() {
        let (device, mut context) = setup();
        let single = TextureDescriptor {
            usage: TextureUsage::RENDER_TARGET,
            width: 4,
            height: 4,
            ..Default::default()
        };
        let multi = TextureDescriptor {
            multisampling: 4,
            ..single.clone()
        };
        let source = device.create_texture(&multi, &[]).unwrap();
        let destination = device.create_texture(&single, &[]).unwrap();

        assert!(context.texture_resolve(source, destination).is_ok());
        assert!(context.texture_resolve(destination, source).is_err());
    }

    #[test]
    fn test_clear_and_draw_validate_their_target() {
        let (device, mut context) = setup();
        let display = device.display_target();

        context.clear_colour_target(display, [1.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(context.last_clear_colour(), Some([1.0, 0.0, 0.0, 1.0]));
        assert!(context.clear_depth_target(TargetHandle(999), 1.0).is_err());

        let full = Viewport::full(1280, 720);
        assert!(context
            .draw(display, DrawCommandHandle(999), full, full)
            .is_err());
    }

    #[test]
    fn test_frame_statistics_count_updates() {
        let (device, mut context) = setup();
        let buffer = device
            .create_buffer(
                &BufferDescriptor {
                    kind: BufferKind::Vertex,
                    size: 8,
                },
                &[],
            )
            .unwrap();

        device.draw_begin();
        context.buffer_update(buffer, &[1; 8]).unwrap();
        context.buffer_update(buffer, &[2; 8]).unwrap();
        context.finish();
        device.draw_end();

        let stats = device.stats();
        assert_eq!(stats.frame_number, 1);
        assert_eq!(stats.updates, 2);
    }
}
