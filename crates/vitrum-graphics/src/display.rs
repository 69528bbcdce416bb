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

//! Pending display options and their reconciliation with the backend.
//!
//! Any thread may change the desired [`DisplayOptions`] through a
//! [`DisplayController`]. Changes only mark the display dirty; the render
//! thread applies them at the start of the next frame with
//! [`reconcile_display`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use vitrum_core::renderer::api::{DisplayConfig, DisplayMode, DisplayOptions};
use vitrum_core::renderer::{RenderDevice, RenderError, RenderSurface};

/// One transition of the display-mode state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStep {
    /// Windowed to borderless.
    EnterBorderless,
    /// Windowed to exclusive fullscreen.
    EnterFullscreen,
    /// Borderless back to windowed.
    ExitBorderless,
    /// Exclusive fullscreen back to windowed.
    ExitFullscreen,
}

impl DisplayStep {
    /// The mode reached after this step.
    pub fn target(self) -> DisplayMode {
        match self {
            DisplayStep::EnterBorderless => DisplayMode::Borderless,
            DisplayStep::EnterFullscreen => DisplayMode::Fullscreen,
            DisplayStep::ExitBorderless | DisplayStep::ExitFullscreen => DisplayMode::Windowed,
        }
    }
}

/// Returns the next step from `current` towards `desired`.
///
/// Borderless and fullscreen are only reachable from windowed mode, so
/// switching between them takes two steps.
pub fn next_display_step(current: DisplayMode, desired: DisplayMode) -> Option<DisplayStep> {
    match (current, desired) {
        _ if current == desired => None,
        (DisplayMode::Windowed, DisplayMode::Borderless) => Some(DisplayStep::EnterBorderless),
        (DisplayMode::Windowed, DisplayMode::Fullscreen) => Some(DisplayStep::EnterFullscreen),
        (DisplayMode::Borderless, _) => Some(DisplayStep::ExitBorderless),
        (DisplayMode::Fullscreen, _) => Some(DisplayStep::ExitFullscreen),
        (DisplayMode::Windowed, DisplayMode::Windowed) => None,
    }
}

/// The mode the backend and surface are in right now.
pub fn current_display_mode(config: &DisplayConfig, surface: &dyn RenderSurface) -> DisplayMode {
    if config.fullscreen {
        DisplayMode::Fullscreen
    } else if surface.is_borderless() {
        DisplayMode::Borderless
    } else {
        DisplayMode::Windowed
    }
}

/// Brings the backend display and the surface in line with `desired`.
///
/// The multisample level is applied first, then the mode is walked one
/// [`DisplayStep`] at a time, then the resolution is applied. In windowed
/// mode the surface is resized before the swap chain.
pub fn reconcile_display(
    device: &dyn RenderDevice,
    surface: &mut dyn RenderSurface,
    desired: &DisplayOptions,
) -> Result<(), RenderError> {
    let mut config = device.display_config();

    if config.multisample_level != desired.multisample_level {
        config.multisample_level = desired.multisample_level;
        device.set_display_config(&config)?;
    }

    let mut mode = current_display_mode(&config, surface);
    while let Some(step) = next_display_step(mode, desired.mode) {
        log::debug!("Display step {step:?}");
        match step {
            DisplayStep::EnterBorderless => surface.enable_borderless(true),
            DisplayStep::ExitBorderless => surface.enable_borderless(false),
            DisplayStep::EnterFullscreen | DisplayStep::ExitFullscreen => {
                config.fullscreen = step == DisplayStep::EnterFullscreen;
                device.set_display_config(&config)?;
            }
        }
        mode = step.target();
    }

    if config.resolution_w != desired.width || config.resolution_h != desired.height {
        if desired.mode == DisplayMode::Windowed
            && surface.size() != (desired.width, desired.height)
        {
            surface.resize(desired.width, desired.height);
        }

        config.resolution_w = desired.width;
        config.resolution_h = desired.height;
        config.multisample_level = 0;
        config.fullscreen = desired.mode == DisplayMode::Fullscreen;
        device.set_display_config(&config)?;
    }

    log::info!(
        "Display set to {}x{} {:?} (x{} MSAA)",
        desired.width,
        desired.height,
        desired.mode,
        desired.multisample_level
    );
    Ok(())
}

/// Thread-safe access to the desired display options.
///
/// Clones share the same options and dirty flag.
#[derive(Debug, Clone, Default)]
pub struct DisplayController {
    options: Arc<Mutex<DisplayOptions>>,
    dirty: Arc<AtomicBool>,
}

impl DisplayController {
    /// Creates a controller holding `options`, marked dirty.
    pub fn new(options: DisplayOptions) -> Self {
        Self {
            options: Arc::new(Mutex::new(options)),
            dirty: Arc::new(AtomicBool::new(true)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DisplayOptions> {
        self.options.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, change: impl FnOnce(&mut DisplayOptions)) {
        change(&mut *self.lock());
        self.dirty.store(true, Ordering::Release);
    }

    /// Requests a new back buffer size.
    pub fn set_resolution(&self, width: u32, height: u32) {
        self.update(|options| {
            options.width = width;
            options.height = height;
        });
    }

    /// Requests a new window mode.
    pub fn set_mode(&self, mode: DisplayMode) {
        self.update(|options| options.mode = mode);
    }

    /// Requests a new multisample level.
    pub fn set_multisample_level(&self, level: u32) {
        self.update(|options| options.multisample_level = level);
    }

    /// A snapshot of the desired options.
    pub fn options(&self) -> DisplayOptions {
        *self.lock()
    }

    /// Returns `true` if options changed since the last [`take_pending`](Self::take_pending).
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Clears the dirty flag and returns the options to apply, if any.
    pub fn take_pending(&self) -> Option<DisplayOptions> {
        let options = self.lock();
        self.dirty.swap(false, Ordering::AcqRel).then_some(*options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(mut current: DisplayMode, desired: DisplayMode) -> Vec<DisplayStep> {
        let mut steps = Vec::new();
        while let Some(step) = next_display_step(current, desired) {
            steps.push(step);
            current = step.target();
            assert!(steps.len() <= 2, "walk did not converge");
        }
        steps
    }

    #[test]
    fn windowed_reaches_either_mode_directly() {
        assert_eq!(
            walk(DisplayMode::Windowed, DisplayMode::Borderless),
            vec![DisplayStep::EnterBorderless]
        );
        assert_eq!(
            walk(DisplayMode::Windowed, DisplayMode::Fullscreen),
            vec![DisplayStep::EnterFullscreen]
        );
    }

    #[test]
    fn switching_between_borderless_and_fullscreen_passes_through_windowed() {
        assert_eq!(
            walk(DisplayMode::Fullscreen, DisplayMode::Borderless),
            vec![DisplayStep::ExitFullscreen, DisplayStep::EnterBorderless]
        );
        assert_eq!(
            walk(DisplayMode::Borderless, DisplayMode::Fullscreen),
            vec![DisplayStep::ExitBorderless, DisplayStep::EnterFullscreen]
        );
    }

    #[test]
    fn no_steps_when_already_there() {
        for mode in [
            DisplayMode::Windowed,
            DisplayMode::Borderless,
            DisplayMode::Fullscreen,
        ] {
            assert!(walk(mode, mode).is_empty());
        }
    }

    #[test]
    fn setters_mark_dirty_and_take_clears() {
        let controller = DisplayController::new(DisplayOptions::default());
        assert!(controller.take_pending().is_some());
        assert!(!controller.is_dirty());
        assert!(controller.take_pending().is_none());

        let shared = controller.clone();
        std::thread::spawn(move || shared.set_resolution(800, 600))
            .join()
            .unwrap();

        assert!(controller.is_dirty());
        let pending = controller.take_pending().unwrap();
        assert_eq!((pending.width, pending.height), (800, 600));
        assert_eq!(pending.mode, DisplayMode::Windowed);
    }
}
