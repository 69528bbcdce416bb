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

//! # Vitrum Graphics
//!
//! Everything above the backend contracts of `vitrum-core`: state object
//! caching, command recording and submission, resource managers, draw and
//! vertex builders, and the [`GraphicsSystem`] tying them to a frame.

#![warn(missing_docs)]

pub mod command;
pub mod display;
pub mod draw_builder;
pub mod loader;
pub mod managers;
pub mod state;
pub mod system;
pub mod vertex_builder;

pub use command::{Command, CommandBatch, CommandQueue, FlushReport, SortKey};
pub use display::DisplayController;
pub use draw_builder::DrawBuilder;
pub use loader::{LoadRequest, LoaderHandle};
pub use state::StateManager;
pub use system::{CompiledDraw, GraphicsSystem};
pub use vertex_builder::VertexBuilder;
