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

//! Expansion of draw-facing state descriptors into backend state objects.

use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{DeviceObject, RenderDevice, ResourceError};

/// A state descriptor that the backend can turn into a state object.
pub trait BackendState: StateDescriptor {
    /// The expanded backend description.
    type Desc: std::fmt::Debug;
    /// The backend handle type.
    type Handle: DeviceObject;

    /// Expands the descriptor.
    fn translate(&self) -> Self::Desc;

    /// Asks the backend to create the state object.
    fn create(device: &dyn RenderDevice, desc: &Self::Desc) -> Result<Self::Handle, ResourceError>;
}

impl BackendState for RasterState {
    type Desc = RasterStateDesc;
    type Handle = RasterStateHandle;

    fn translate(&self) -> RasterStateDesc {
        RasterStateDesc {
            fill_mode: self.fill_mode,
            cull_mode: self.cull_mode,
            scissor_enable: self.enable_scissor,
            multisample_enable: true,
            depth_clip_enable: true,
        }
    }

    fn create(
        device: &dyn RenderDevice,
        desc: &RasterStateDesc,
    ) -> Result<RasterStateHandle, ResourceError> {
        device.create_raster_state(desc)
    }
}

impl BackendState for BlendState {
    type Desc = BlendStateDesc;
    type Handle = BlendStateHandle;

    /// Colour: `src * src.a + dst * (1 - src.a)`.
    /// Alpha: `src.a * (1 - dst.a) + dst.a`, i.e. `1 - (1 - src.a)(1 - dst.a)`.
    fn translate(&self) -> BlendStateDesc {
        BlendStateDesc {
            alpha_to_coverage: false,
            independent_blend: false,
            enable: self.enable,
            src_colour: BlendFactor::SrcAlpha,
            dst_colour: BlendFactor::InvSrcAlpha,
            colour_op: BlendOp::Add,
            src_alpha: BlendFactor::InvDestAlpha,
            dst_alpha: BlendFactor::One,
            alpha_op: BlendOp::Add,
            write_mask: ColourWrites::ALL,
        }
    }

    fn create(
        device: &dyn RenderDevice,
        desc: &BlendStateDesc,
    ) -> Result<BlendStateHandle, ResourceError> {
        device.create_blend_state(desc)
    }
}

const STENCIL_PASSTHROUGH: StencilFaceDesc = StencilFaceDesc {
    compare: CompareFunction::Always,
    fail_op: StencilOp::Keep,
    depth_fail_op: StencilOp::Keep,
    pass_op: StencilOp::Keep,
};

impl BackendState for DepthState {
    type Desc = DepthStencilDesc;
    type Handle = DepthStateHandle;

    fn translate(&self) -> DepthStencilDesc {
        DepthStencilDesc {
            depth_enable: self.enable_depth,
            depth_write_mask: DepthWriteMask::All,
            depth_compare: CompareFunction::Less,
            stencil_enable: self.enable_stencil,
            stencil_read_mask: 0xFF,
            stencil_write_mask: 0xFF,
            front_face: STENCIL_PASSTHROUGH,
            back_face: STENCIL_PASSTHROUGH,
        }
    }

    fn create(
        device: &dyn RenderDevice,
        desc: &DepthStencilDesc,
    ) -> Result<DepthStateHandle, ResourceError> {
        device.create_depth_state(desc)
    }
}

impl BackendState for SamplerState {
    type Desc = SamplerDesc;
    type Handle = SamplerStateHandle;

    fn translate(&self) -> SamplerDesc {
        let (filter, max_anisotropy) = match self.filtering {
            Filtering::Point => (FilterMode::MinMagMipPoint, None),
            Filtering::Bilinear => (FilterMode::MinMagLinearMipPoint, None),
            Filtering::Trilinear => (FilterMode::MinMagMipLinear, None),
            Filtering::Anisotropic2x => (FilterMode::Anisotropic, Some(2)),
            Filtering::Anisotropic4x => (FilterMode::Anisotropic, Some(4)),
            Filtering::Anisotropic8x => (FilterMode::Anisotropic, Some(8)),
            Filtering::Anisotropic16x => (FilterMode::Anisotropic, Some(16)),
        };

        SamplerDesc {
            address_u: self.address_u,
            address_v: self.address_v,
            address_w: self.address_w,
            filter,
            max_anisotropy,
            compare: CompareFunction::Never,
            min_lod: -f32::MAX,
            max_lod: f32::MAX,
            mip_lod_bias: 0.0,
            border_colour: self.border_colour.to_normalized(),
        }
    }

    fn create(
        device: &dyn RenderDevice,
        desc: &SamplerDesc,
    ) -> Result<SamplerStateHandle, ResourceError> {
        device.create_sampler_state(desc)
    }
}
