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

//! The "common language" for all rendering operations.
//!
//! This module holds the abstract backend `traits` (like [`RenderDevice`]),
//! the descriptors they consume, and the error types shared by every layer.
//! A concrete backend lives in `vitrum-infra`; `vitrum-graphics` drives these
//! traits without knowing which backend sits behind them.

pub mod api;
pub mod error;
pub mod resource;
pub mod traits;

pub use self::api::*;
pub use self::error::{BackendStatus, ManagerError, RenderError, ResourceError, ResourceKind};
pub use self::resource::{DeviceObject, GpuResource};
pub use self::traits::{RenderContext, RenderDevice, RenderSurface};
