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

//! Backend-agnostic rendering API.
//!
//! - **[`handles`]**: opaque backend handles and manager ids.
//! - **[`buffer`]**, **[`texture`]**, **[`shader`]**: resource descriptors.
//! - **[`state`]**: fixed-function state descriptors and backend state objects.
//! - **[`vertex`]**, **[`draw`]**: vertex layout and draw call description.
//! - **[`display`]**, **[`stats`]**: display configuration and frame counters.

pub mod buffer;
pub mod display;
pub mod draw;
pub mod handles;
pub mod shader;
pub mod state;
pub mod stats;
pub mod texture;
pub mod vertex;

pub use self::buffer::*;
pub use self::display::*;
pub use self::draw::*;
pub use self::handles::*;
pub use self::shader::*;
pub use self::state::*;
pub use self::stats::*;
pub use self::texture::*;
pub use self::vertex::*;
