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

//! Scoped ownership of backend objects.

use crate::renderer::api::*;
use crate::renderer::error::{ResourceError, ResourceKind};
use crate::renderer::traits::RenderDevice;
use std::fmt;
use std::sync::Arc;

/// A backend handle that knows how to destroy itself.
pub trait DeviceObject: Copy + fmt::Debug + Send + Sync + 'static {
    /// The kind of backend object, for diagnostics.
    const KIND: ResourceKind;

    /// Asks `device` to destroy the object.
    fn release(self, device: &dyn RenderDevice) -> Result<(), ResourceError>;
}

macro_rules! device_object {
    ($($handle:ty => $kind:ident, $destroy:ident;)*) => {
        $(
            impl DeviceObject for $handle {
                const KIND: ResourceKind = ResourceKind::$kind;

                fn release(self, device: &dyn RenderDevice) -> Result<(), ResourceError> {
                    device.$destroy(self)
                }
            }
        )*
    };
}

device_object! {
    BufferHandle => Buffer, destroy_buffer;
    TextureHandle => Texture, destroy_texture;
    ShaderHandle => Shader, destroy_shader;
    TargetHandle => Target, destroy_target;
    DrawCommandHandle => DrawCommand, destroy_draw_command;
    BlendStateHandle => BlendState, destroy_blend_state;
    DepthStateHandle => DepthState, destroy_depth_state;
    RasterStateHandle => RasterState, destroy_raster_state;
    SamplerStateHandle => SamplerState, destroy_sampler_state;
}

/// Owns one backend object and destroys it when dropped.
pub struct GpuResource<H: DeviceObject> {
    device: Arc<dyn RenderDevice>,
    handle: H,
}

impl<H: DeviceObject> GpuResource<H> {
    /// Takes ownership of `handle`, which must have been created by `device`.
    pub fn new(device: Arc<dyn RenderDevice>, handle: H) -> Self {
        Self { device, handle }
    }

    /// The owned backend handle.
    pub fn handle(&self) -> H {
        self.handle
    }

    /// The device the object belongs to.
    pub fn device(&self) -> &Arc<dyn RenderDevice> {
        &self.device
    }
}

impl<H: DeviceObject> Drop for GpuResource<H> {
    fn drop(&mut self) {
        if let Err(err) = self.handle.release(self.device.as_ref()) {
            log::warn!("Failed to destroy {:?} {:?}: {err}", H::KIND, self.handle);
        }
    }
}

impl<H: DeviceObject> fmt::Debug for GpuResource<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuResource")
            .field("kind", &H::KIND)
            .field("handle", &self.handle)
            .finish()
    }
}
