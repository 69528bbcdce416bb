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

use super::queue::Command;
use vitrum_core::renderer::{RenderContext, RenderError};

/// Executes one recorded command on `context`.
pub fn dispatch(
    context: &mut dyn RenderContext,
    command: &Command,
    payload: Option<&[u8]>,
) -> Result<(), RenderError> {
    log::trace!("Dispatching {command:?}");

    match *command {
        Command::Draw {
            target,
            draw,
            viewport,
            scissor,
        } => context.draw(target, draw, viewport, scissor),
        Command::BufferUpdate { buffer } => {
            let data = payload.ok_or(RenderError::MissingPayload)?;
            context.buffer_update(buffer, data)
        }
        Command::TextureUpdate { texture, index } => {
            let data = payload.ok_or(RenderError::MissingPayload)?;
            context.texture_update(texture, index, data)
        }
        Command::TextureResolve {
            source,
            destination,
        } => context.texture_resolve(source, destination),
        Command::TargetClear {
            target,
            colour,
            depth,
        } => {
            let cleared = context.clear_colour_target(target, colour);
            let depth_cleared = context.clear_depth_target(target, depth);
            cleared.and(depth_cleared)
        }
    }
}
