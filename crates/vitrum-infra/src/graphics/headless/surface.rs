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

use vitrum_core::renderer::RenderSurface;

/// A window that only exists as a size and a borderless flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    borderless: bool,
}

impl HeadlessSurface {
    /// Creates a decorated surface of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            borderless: false,
        }
    }
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Headless surface resized to {width}x{height}");
        self.width = width;
        self.height = height;
    }

    fn is_borderless(&self) -> bool {
        self.borderless
    }

    fn enable_borderless(&mut self, enable: bool) {
        self.borderless = enable;
    }
}
