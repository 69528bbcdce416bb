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

//! Resource managers for textures, shaders, meshes and buffers.
//!
//! Every manager follows the same pattern: a load either returns a typed id or
//! a [`ManagerError`] describing why it failed. Files go through a
//! [`FileResolver`], are checked for their container signature, decoded,
//! turned into backend objects and stored in a generation-checked table.
//! Dropping an entry releases its backend objects.
//!
//! A manager built with `Default` is detached from any device and answers
//! every request with [`ManagerError::NullManager`].

mod buffer;
mod mesh;
mod shader;
mod texture;

pub use buffer::{BufferInstance, BufferManager};
pub use mesh::{MeshInstance, MeshManager, VertexMesh};
pub use shader::{ShaderManager, ShaderProgram};
pub use texture::{TextureInstance, TextureLoadFlags, TextureManager};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use vitrum_core::renderer::{ManagerError, RenderDevice};
use vitrum_core::vfs::{DiskFileSource, FileSource};

/// Resolves resource paths against a root directory.
#[derive(Debug, Clone)]
pub struct FileResolver {
    source: Arc<dyn FileSource>,
    root: PathBuf,
}

impl Default for FileResolver {
    fn default() -> Self {
        Self::disk(".")
    }
}

impl FileResolver {
    /// Resolves paths through `source`, relative to `root`.
    pub fn new(source: Arc<dyn FileSource>, root: impl Into<PathBuf>) -> Self {
        Self {
            source,
            root: root.into(),
        }
    }

    /// Resolves paths on the local disk, relative to `root`.
    pub fn disk(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(DiskFileSource), root)
    }

    /// The directory relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Changes the directory relative paths are resolved against.
    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        self.root = root.into();
    }

    /// Finds the file for `path`: an existing absolute path first, then
    /// `path` joined onto the root.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, ManagerError> {
        self.source
            .resolve(&self.root, path)
            .ok_or_else(|| ManagerError::FileNotFound {
                path: path.to_path_buf(),
            })
    }

    /// Reads a resolved file.
    pub fn read(&self, resolved: &Path) -> Result<Vec<u8>, ManagerError> {
        self.source.read(resolved).map_err(|err| {
            log::debug!("Read of '{}' failed: {err}", resolved.display());
            ManagerError::FileNotFound {
                path: resolved.to_path_buf(),
            }
        })
    }
}

/// Returns the attached device or [`ManagerError::NullManager`].
fn attached(
    device: &Option<Arc<dyn RenderDevice>>,
) -> Result<&Arc<dyn RenderDevice>, ManagerError> {
    device.as_ref().ok_or(ManagerError::NullManager)
}
