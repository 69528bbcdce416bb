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

//! Defines the hierarchy of error types for the rendering subsystem.

use crate::asset::ContainerError;
use crate::table::HandleError;
use std::fmt;
use std::path::PathBuf;

/// The status code a backend reports when it refuses to create a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// Unspecified failure.
    Fail,
    /// A descriptor field was out of range.
    InvalidParameter,
    /// A referenced backend resource does not exist.
    InvalidResource,
    /// The texture format is not supported for the requested usage.
    InvalidTextureFormat,
    /// The shader bytecode was rejected.
    InvalidShaderByteCode,
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BackendStatus::Fail => "failure",
            BackendStatus::InvalidParameter => "invalid parameter",
            BackendStatus::InvalidResource => "invalid resource",
            BackendStatus::InvalidTextureFormat => "invalid texture format",
            BackendStatus::InvalidShaderByteCode => "invalid shader bytecode",
        };
        f.write_str(text)
    }
}

/// The kind of backend object involved in a [`ResourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A vertex, index or constant buffer.
    Buffer,
    /// A texture of any dimensionality.
    Texture,
    /// A single shader stage.
    Shader,
    /// A render target.
    Target,
    /// A compiled draw command.
    DrawCommand,
    /// A blend state object.
    BlendState,
    /// A depth/stencil state object.
    DepthState,
    /// A rasterizer state object.
    RasterState,
    /// A sampler state object.
    SamplerState,
}

/// An error related to the creation or lookup of a backend resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The backend refused to create the resource.
    BackendCreateFailed {
        /// What was being created.
        kind: ResourceKind,
        /// The status code reported by the backend.
        status: BackendStatus,
    },
    /// A backend handle did not refer to a live resource.
    InvalidHandle(ResourceKind),
    /// The resource could not be found.
    NotFound,
    /// The backend does not support the requested feature.
    Unsupported(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::BackendCreateFailed { kind, status } => {
                write!(f, "Backend failed to create {kind:?}: {status}")
            }
            ResourceError::InvalidHandle(kind) => write!(f, "Invalid {kind:?} handle"),
            ResourceError::NotFound => write!(f, "Resource not found"),
            ResourceError::Unsupported(what) => write!(f, "Unsupported: {what}"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// The outcome of a failed resource manager operation.
///
/// Together with `Ok`, these variants form the manager status taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub enum ManagerError {
    /// The backend failed to create or update the resource.
    Fail(ResourceError),
    /// The manager is not attached to a device.
    NullManager,
    /// No file exists at the given path.
    FileNotFound {
        /// The path as it was requested.
        path: PathBuf,
    },
    /// The file exists but its contents could not be decoded.
    FileCorrupt {
        /// The resolved path of the file.
        path: PathBuf,
        /// Why decoding failed.
        reason: String,
    },
    /// The load flags or descriptor are inconsistent.
    InvalidOptions(String),
    /// The handle does not address a live resource.
    NotFound,
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerError::Fail(err) => write!(f, "Resource creation failed: {err}"),
            ManagerError::NullManager => write!(f, "Manager is not attached to a device"),
            ManagerError::FileNotFound { path } => {
                write!(f, "File not found: '{}'", path.display())
            }
            ManagerError::FileCorrupt { path, reason } => {
                write!(f, "File '{}' is corrupt: {reason}", path.display())
            }
            ManagerError::InvalidOptions(details) => write!(f, "Invalid options: {details}"),
            ManagerError::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl std::error::Error for ManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManagerError::Fail(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for ManagerError {
    fn from(err: ResourceError) -> Self {
        ManagerError::Fail(err)
    }
}

impl From<HandleError> for ManagerError {
    fn from(err: HandleError) -> Self {
        match err {
            HandleError::InvalidHandle => ManagerError::NotFound,
            HandleError::AllocationOverflow => {
                ManagerError::Fail(ResourceError::Unsupported(err.to_string()))
            }
        }
    }
}

impl ManagerError {
    /// Maps a container decoding failure for the file at `path`.
    pub fn corrupt(path: impl Into<PathBuf>, err: ContainerError) -> Self {
        ManagerError::FileCorrupt {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

/// A high-level error from the rendering system.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The renderer has not been initialized or was shut down.
    NotInitialized,
    /// A resource could not be created or resolved.
    Resource(ResourceError),
    /// A resource manager operation failed.
    Manager(ManagerError),
    /// A handle table operation failed.
    Handle(HandleError),
    /// An update command was submitted without its data payload.
    MissingPayload,
    /// The backend failed while executing a command.
    Dispatch(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotInitialized => write!(f, "Renderer is not initialized"),
            RenderError::Resource(err) => write!(f, "Resource error: {err}"),
            RenderError::Manager(err) => write!(f, "Manager error: {err}"),
            RenderError::Handle(err) => write!(f, "Handle error: {err}"),
            RenderError::MissingPayload => write!(f, "Command requires a data payload"),
            RenderError::Dispatch(details) => write!(f, "Command dispatch failed: {details}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Resource(err) => Some(err),
            RenderError::Manager(err) => Some(err),
            RenderError::Handle(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResourceError> for RenderError {
    fn from(err: ResourceError) -> Self {
        RenderError::Resource(err)
    }
}

impl From<ManagerError> for RenderError {
    fn from(err: ManagerError) -> Self {
        RenderError::Manager(err)
    }
}

impl From<HandleError> for RenderError {
    fn from(err: HandleError) -> Self {
        RenderError::Handle(err)
    }
}
