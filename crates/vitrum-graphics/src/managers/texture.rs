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

use super::{attached, FileResolver};
use bitflags::bitflags;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vitrum_core::asset::{Container, ImageContainer};
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{GpuResource, ManagerError, RenderDevice};
use vitrum_core::table::{HandleAllocator, Table};

bitflags! {
    /// Options applied while loading a texture file.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureLoadFlags: u32 {
        /// Allocate and generate a full mip chain.
        const GEN_MIPS = 1;
    }
}

/// A texture owned by the [`TextureManager`].
#[derive(Debug)]
pub struct TextureInstance {
    resource: GpuResource<TextureHandle>,
    descriptor: TextureDescriptor,
    source: Option<(PathBuf, TextureLoadFlags)>,
}

impl TextureInstance {
    /// The backend texture.
    pub fn handle(&self) -> TextureHandle {
        self.resource.handle()
    }

    /// The descriptor the texture was created with.
    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    /// The resolved file the texture was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.source.as_ref().map(|(path, _)| path.as_path())
    }

    /// The flags the texture file was loaded with, if it came from a file.
    pub fn load_flags(&self) -> Option<TextureLoadFlags> {
        self.source.as_ref().map(|&(_, flags)| flags)
    }
}

/// Loads texture files and owns the resulting backend textures.
#[derive(Debug, Default)]
pub struct TextureManager {
    device: Option<Arc<dyn RenderDevice>>,
    files: FileResolver,
    textures: Table<TextureInstance, TextureId>,
    by_source: HashMap<(PathBuf, TextureLoadFlags), TextureId>,
}

impl TextureManager {
    /// Creates a manager creating textures on `device` and reading from `files`.
    pub fn new(device: Arc<dyn RenderDevice>, files: FileResolver) -> Self {
        Self {
            device: Some(device),
            files,
            ..Default::default()
        }
    }

    /// Replaces the handle quarantine size. Call before creating anything.
    pub fn with_min_free_indices(mut self, min_free_indices: usize) -> Self {
        self.textures =
            Table::with_allocator(HandleAllocator::with_min_free_indices(min_free_indices));
        self
    }

    /// Loads a `TSTX` texture file.
    ///
    /// Loading the same resolved path with the same flags twice returns the
    /// first id.
    ///
    /// ## Errors
    /// * `FileNotFound` if the path resolves to nothing.
    /// * `FileCorrupt` if the signature, payload or slice data is wrong.
    /// * `InvalidOptions` if `GEN_MIPS` is requested for a format the device
    ///   cannot generate mips for.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        flags: TextureLoadFlags,
    ) -> Result<TextureId, ManagerError> {
        let path = path.as_ref();
        let result = self.load_file(path, flags);
        if let Err(err) = &result {
            log::warn!("Failed to load texture '{}': {err}", path.display());
        }
        result
    }

    fn load_file(
        &mut self,
        path: &Path,
        flags: TextureLoadFlags,
    ) -> Result<TextureId, ManagerError> {
        let device = Arc::clone(attached(&self.device)?);
        let resolved = self.files.resolve(path)?;

        let key = (resolved.clone(), flags);
        if let Some(&id) = self.by_source.get(&key) {
            if self.textures.contains(id) {
                return Ok(id);
            }
        }

        let bytes = self.files.read(&resolved)?;
        let image =
            ImageContainer::decode(&bytes).map_err(|e| ManagerError::corrupt(&resolved, e))?;

        let mut descriptor = image.descriptor;
        if image.slices.len() != descriptor.slice_count() {
            return Err(ManagerError::FileCorrupt {
                path: resolved,
                reason: format!(
                    "expected {} array slices, found {}",
                    descriptor.slice_count(),
                    image.slices.len()
                ),
            });
        }
        let slice_size = descriptor.slice_size().ok_or_else(|| ManagerError::FileCorrupt {
            path: resolved.clone(),
            reason: "texture dimensions overflow".to_string(),
        })?;
        if let Some(short) = image
            .slices
            .iter()
            .position(|slice| slice.len() < slice_size)
        {
            return Err(ManagerError::FileCorrupt {
                path: resolved,
                reason: format!("array slice {short} is truncated"),
            });
        }

        if flags.contains(TextureLoadFlags::GEN_MIPS) {
            descriptor.use_mips = true;
        }
        validate_options(device.as_ref(), &descriptor)?;

        let slices: Vec<&[u8]> = image.slices.iter().map(Vec::as_slice).collect();
        let id = self.insert(&device, descriptor, &slices, Some(key.clone()))?;
        self.by_source.insert(key, id);
        Ok(id)
    }

    /// Creates a texture from memory.
    ///
    /// Shader resources need one slice of data per array layer; render and
    /// depth targets may pass no data at all.
    pub fn create(
        &mut self,
        descriptor: &TextureDescriptor,
        slices: &[&[u8]],
    ) -> Result<TextureId, ManagerError> {
        let device = Arc::clone(attached(&self.device)?);
        let slice_size = validate_options(device.as_ref(), descriptor)?;

        let is_target = descriptor
            .usage
            .intersects(TextureUsage::RENDER_TARGET | TextureUsage::DEPTH_TARGET);
        if !(is_target && slices.is_empty()) {
            if slices.len() != descriptor.slice_count() {
                return Err(ManagerError::InvalidOptions(format!(
                    "expected {} array slices, got {}",
                    descriptor.slice_count(),
                    slices.len()
                )));
            }
            if slices.iter().any(|s| s.len() < slice_size) {
                return Err(ManagerError::InvalidOptions(
                    "texture data is smaller than the descriptor requires".to_string(),
                ));
            }
        }

        self.insert(&device, descriptor.clone(), slices, None)
    }

    fn insert(
        &mut self,
        device: &Arc<dyn RenderDevice>,
        descriptor: TextureDescriptor,
        slices: &[&[u8]],
        source: Option<(PathBuf, TextureLoadFlags)>,
    ) -> Result<TextureId, ManagerError> {
        let (row_pitch, depth_pitch) = descriptor
            .row_pitch()
            .zip(descriptor.depth_pitch())
            .ok_or_else(dimensions_overflow)?;
        let views: Vec<TextureSlice<'_>> = slices
            .iter()
            .map(|&data| TextureSlice {
                data,
                row_pitch,
                depth_pitch,
            })
            .collect();

        let handle = device.create_texture(&descriptor, &views)?;
        log::debug!(
            "Created {:?} {}x{} texture {handle:?}",
            descriptor.format,
            descriptor.width,
            descriptor.height
        );

        let instance = TextureInstance {
            resource: GpuResource::new(Arc::clone(device), handle),
            descriptor,
            source,
        };
        Ok(self.textures.create(instance)?)
    }

    /// Borrows a texture.
    pub fn get(&self, id: TextureId) -> Result<&TextureInstance, ManagerError> {
        attached(&self.device)?;
        Ok(self.textures.get(id)?)
    }

    /// The backend handle of a texture.
    pub fn handle(&self, id: TextureId) -> Result<TextureHandle, ManagerError> {
        self.get(id).map(TextureInstance::handle)
    }

    /// The descriptor of a texture.
    pub fn properties(&self, id: TextureId) -> Result<&TextureDescriptor, ManagerError> {
        self.get(id).map(TextureInstance::descriptor)
    }

    /// Destroys a texture. Stale ids are ignored.
    pub fn destroy(&mut self, id: TextureId) {
        if let Ok(instance) = self.textures.remove(id) {
            if let Some(key) = &instance.source {
                self.by_source.remove(key);
            }
        }
    }

    /// Destroys every texture.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.by_source.clear();
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Returns `true` if no texture is alive.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// The directory relative paths are resolved against.
    pub fn root_path(&self) -> &Path {
        self.files.root()
    }

    /// Changes the directory relative paths are resolved against.
    pub fn set_root_path(&mut self, root: impl Into<PathBuf>) {
        self.files.set_root(root);
    }
}

fn dimensions_overflow() -> ManagerError {
    ManagerError::InvalidOptions("texture dimensions overflow".to_string())
}

/// Checks a descriptor and returns the size of one of its array slices.
fn validate_options(
    device: &dyn RenderDevice,
    descriptor: &TextureDescriptor,
) -> Result<usize, ManagerError> {
    if descriptor.width == 0 {
        return Err(ManagerError::InvalidOptions(
            "texture width must be non-zero".to_string(),
        ));
    }
    if descriptor.use_mips {
        if descriptor.format.is_depth() {
            return Err(ManagerError::InvalidOptions(
                "mip generation is not available for depth formats".to_string(),
            ));
        }
        if !device.supports_mip_generation(descriptor.format) {
            return Err(ManagerError::InvalidOptions(format!(
                "device cannot generate mips for {:?}",
                descriptor.format
            )));
        }
    }
    descriptor.slice_size().ok_or_else(dimensions_overflow)
}
