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

//! Recording, ordering and execution of rendering commands.
//!
//! Commands are recorded into [`CommandBatch`]es, submitted to a
//! [`CommandQueue`] with a priority, optionally sorted, and finally flushed to
//! a [`RenderContext`](vitrum_core::renderer::RenderContext).

mod dispatch;
mod queue;

pub use dispatch::dispatch;
pub use queue::{Command, CommandBatch, CommandQueue, FlushReport, SortKey};
