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

//! Display configuration and screen-space rectangles.

use serde::{Deserialize, Serialize};

/// The backend's view of the display swap chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayConfig {
    /// Back buffer width in pixels.
    pub resolution_w: u32,
    /// Back buffer height in pixels.
    pub resolution_h: u32,
    /// Samples per pixel; zero leaves the current setting unchanged.
    pub multisample_level: u32,
    /// Exclusive fullscreen.
    pub fullscreen: bool,
}

/// How the application window occupies the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// A decorated window.
    #[default]
    Windowed,
    /// An undecorated window covering the screen.
    Borderless,
    /// Exclusive fullscreen.
    Fullscreen,
}

/// The display settings requested by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Desired width in pixels.
    pub width: u32,
    /// Desired height in pixels.
    pub height: u32,
    /// Desired window mode.
    pub mode: DisplayMode,
    /// Desired samples per pixel.
    pub multisample_level: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            mode: DisplayMode::Windowed,
            multisample_level: 1,
        }
    }
}

/// A rectangle of the render target that primitives are mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Viewport {
    /// A viewport covering a `w` x `h` target from the origin.
    pub const fn full(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }
}

/// A rectangle outside of which fragments are discarded when scissoring.
pub type Scissor = Viewport;
