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

//! Opaque handles to backend objects and to manager-owned resources.

macro_rules! backend_handle {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $name(pub usize);
        )*
    };
}

backend_handle! {
    /// An opaque handle to a GPU buffer owned by the backend.
    BufferHandle;
    /// An opaque handle to a GPU texture owned by the backend.
    TextureHandle;
    /// An opaque handle to one compiled shader stage.
    ShaderHandle;
    /// An opaque handle to a render target (colour and depth attachments).
    TargetHandle;
    /// An opaque handle to a draw command compiled by the backend.
    DrawCommandHandle;
    /// An opaque handle to a backend blend state object.
    BlendStateHandle;
    /// An opaque handle to a backend depth/stencil state object.
    DepthStateHandle;
    /// An opaque handle to a backend rasterizer state object.
    RasterStateHandle;
    /// An opaque handle to a backend sampler state object.
    SamplerStateHandle;
}

crate::typed_handle! {
    /// Addresses a texture owned by the texture manager.
    pub struct TextureId(u32);
}

crate::typed_handle! {
    /// Addresses a shader program owned by the shader manager.
    pub struct ShaderId(u32);
}

crate::typed_handle! {
    /// Addresses a mesh owned by the mesh manager.
    pub struct MeshId(u32);
}

crate::typed_handle! {
    /// Addresses a buffer owned by the buffer manager.
    pub struct BufferId(u32);
}
