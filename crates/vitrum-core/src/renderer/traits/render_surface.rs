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

use std::fmt::Debug;

/// The window the display presents into, as seen by the graphics system.
pub trait RenderSurface: Debug {
    /// Client area size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resizes the client area.
    fn resize(&mut self, width: u32, height: u32);

    /// Returns `true` while the window is undecorated and covers the screen.
    fn is_borderless(&self) -> bool;

    /// Switches borderless mode on or off.
    fn enable_borderless(&mut self, enable: bool);
}
