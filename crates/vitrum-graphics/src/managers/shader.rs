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
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vitrum_core::asset::{Container, ShaderContainer};
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::{GpuResource, ManagerError, RenderDevice};
use vitrum_core::table::{HandleAllocator, Table};

/// File extension appended to program names.
const SHADER_EXTENSION: &str = "shader";

/// A linked set of shader stages owned by the [`ShaderManager`].
#[derive(Debug)]
pub struct ShaderProgram {
    name: Option<String>,
    stages: Vec<(ShaderStage, GpuResource<ShaderHandle>)>,
}

impl ShaderProgram {
    /// The name the program was loaded under, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The backend handle of every present stage.
    pub fn stage_handles(&self) -> ShaderStages {
        let mut stages = ShaderStages::default();
        for (stage, resource) in &self.stages {
            stages.set(*stage, Some(resource.handle()));
        }
        stages
    }

    /// Returns `true` if the program has a `stage` stage.
    pub fn has_stage(&self, stage: ShaderStage) -> bool {
        self.stages.iter().any(|(present, _)| *present == stage)
    }
}

/// Loads shader programs by name and owns their backend stages.
#[derive(Debug, Default)]
pub struct ShaderManager {
    device: Option<Arc<dyn RenderDevice>>,
    files: FileResolver,
    programs: Table<ShaderProgram, ShaderId>,
    by_name: HashMap<String, ShaderId>,
}

impl ShaderManager {
    /// Creates a manager creating shaders on `device` and reading from `files`.
    pub fn new(device: Arc<dyn RenderDevice>, files: FileResolver) -> Self {
        Self {
            device: Some(device),
            files,
            ..Default::default()
        }
    }

    /// Replaces the handle quarantine size. Call before creating anything.
    pub fn with_min_free_indices(mut self, min_free_indices: usize) -> Self {
        self.programs =
            Table::with_allocator(HandleAllocator::with_min_free_indices(min_free_indices));
        self
    }

    /// Loads the program stored in `<root>/<name>.shader`.
    ///
    /// Programs are cached by name: loading a name again returns the live id.
    /// Every stage signature is checked before any backend object is created.
    pub fn load(&mut self, name: &str) -> Result<ShaderId, ManagerError> {
        let result = self.load_program(name);
        if let Err(err) = &result {
            log::warn!("Failed to load shader '{name}': {err}");
        }
        result
    }

    fn load_program(&mut self, name: &str) -> Result<ShaderId, ManagerError> {
        let device = Arc::clone(attached(&self.device)?);

        if let Some(&id) = self.by_name.get(name) {
            if self.programs.contains(id) {
                return Ok(id);
            }
        }

        let path = PathBuf::from(format!("{name}.{SHADER_EXTENSION}"));
        let resolved = self.files.resolve(&path)?;
        let bytes = self.files.read(&resolved)?;
        let container =
            ShaderContainer::decode(&bytes).map_err(|e| ManagerError::corrupt(&resolved, e))?;

        if container.stages.is_empty() {
            return Err(ManagerError::FileCorrupt {
                path: resolved,
                reason: "program has no stages".to_string(),
            });
        }

        let mut stages: Vec<(ShaderStage, &[u8])> = Vec::with_capacity(container.stages.len());
        for blob in &container.stages {
            if stages.iter().any(|(stage, _)| *stage == blob.stage) {
                return Err(ManagerError::FileCorrupt {
                    path: resolved,
                    reason: format!("duplicate {:?} stage", blob.stage),
                });
            }
            let code = blob
                .code()
                .map_err(|e| ManagerError::corrupt(&resolved, e))?;
            stages.push((blob.stage, code));
        }

        let id = self.insert(&device, Some(name.to_string()), &stages)?;
        self.by_name.insert(name.to_string(), id);
        log::info!("Loaded shader program '{name}' ({} stages)", stages.len());
        Ok(id)
    }

    /// Creates a program from raw stage bytecode (without stage signatures).
    pub fn create(&mut self, stages: &[(ShaderStage, &[u8])]) -> Result<ShaderId, ManagerError> {
        let device = Arc::clone(attached(&self.device)?);
        if stages.is_empty() {
            return Err(ManagerError::InvalidOptions(
                "a program needs at least one stage".to_string(),
            ));
        }
        self.insert(&device, None, stages)
    }

    fn insert(
        &mut self,
        device: &Arc<dyn RenderDevice>,
        name: Option<String>,
        stages: &[(ShaderStage, &[u8])],
    ) -> Result<ShaderId, ManagerError> {
        // Stages created before a failure are released when `created` drops.
        let mut created = Vec::with_capacity(stages.len());
        for (stage, code) in stages {
            let handle = device.create_shader(*stage, code)?;
            created.push((*stage, GpuResource::new(Arc::clone(device), handle)));
        }

        let program = ShaderProgram {
            name,
            stages: created,
        };
        Ok(self.programs.create(program)?)
    }

    /// Borrows a program.
    pub fn program(&self, id: ShaderId) -> Result<&ShaderProgram, ManagerError> {
        attached(&self.device)?;
        Ok(self.programs.get(id)?)
    }

    /// Destroys a program. Stale ids are ignored.
    pub fn destroy(&mut self, id: ShaderId) {
        if let Ok(program) = self.programs.remove(id) {
            if let Some(name) = program.name() {
                self.by_name.remove(name);
            }
        }
    }

    /// Destroys every program.
    pub fn clear(&mut self) {
        self.programs.clear();
        self.by_name.clear();
    }

    /// Number of live programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Returns `true` if no program is alive.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// The directory program files are read from.
    pub fn root_path(&self) -> &Path {
        self.files.root()
    }

    /// Changes the directory program files are read from.
    pub fn set_root_path(&mut self, root: impl Into<PathBuf>) {
        self.files.set_root(root);
    }
}
