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

use super::dispatch::dispatch;
use std::ops::Range;
use vitrum_core::renderer::api::*;
use vitrum_core::renderer::RenderContext;

/// Orders submitted batches; lower keys execute first.
pub type SortKey = u64;

/// A rendering operation recorded into a [`CommandBatch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Executes a compiled draw call.
    Draw {
        /// Render target drawn into.
        target: TargetHandle,
        /// The compiled draw call.
        draw: DrawCommandHandle,
        /// Viewport rectangle.
        viewport: Viewport,
        /// Scissor rectangle, used when the raster state enables scissoring.
        scissor: Scissor,
    },
    /// Overwrites a buffer with the command's payload.
    BufferUpdate {
        /// The buffer written.
        buffer: BufferHandle,
    },
    /// Overwrites one texture array slice with the command's payload.
    TextureUpdate {
        /// The texture written.
        texture: TextureHandle,
        /// The array slice written.
        index: u32,
    },
    /// Resolves a multisampled texture.
    TextureResolve {
        /// Multisampled source.
        source: TextureHandle,
        /// Single-sampled destination.
        destination: TextureHandle,
    },
    /// Clears the colour attachments, then the depth attachment, of a target.
    TargetClear {
        /// The target cleared.
        target: TargetHandle,
        /// Colour written to every colour attachment.
        colour: [f32; 4],
        /// Depth written to the depth attachment.
        depth: f32,
    },
}

#[derive(Debug, Clone)]
struct RecordedCommand {
    command: Command,
    payload: Option<Range<usize>>,
}

/// An ordered list of commands still being recorded.
///
/// Payload bytes are copied into one arena owned by the batch, so a batch is
/// self-contained once recorded. Submitting a batch to a [`CommandQueue`]
/// moves it; it cannot be changed afterwards.
#[derive(Debug, Clone, Default)]
pub struct CommandBatch {
    commands: Vec<RecordedCommand>,
    arena: Vec<u8>,
}

impl CommandBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `command`, copying `payload` into the batch arena.
    pub fn push(&mut self, command: Command, payload: Option<&[u8]>) {
        let payload = payload.map(|bytes| {
            let start = self.arena.len();
            self.arena.extend_from_slice(bytes);
            start..self.arena.len()
        });
        self.commands.push(RecordedCommand { command, payload });
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over the commands in recording order, with their payloads.
    pub fn iter(&self) -> impl Iterator<Item = (&Command, Option<&[u8]>)> {
        self.commands.iter().map(|recorded| {
            let payload = recorded
                .payload
                .as_ref()
                .and_then(|range| self.arena.get(range.clone()));
            (&recorded.command, payload)
        })
    }
}

#[derive(Debug)]
struct SubmittedBatch {
    priority: SortKey,
    batch: CommandBatch,
}

/// The outcome of a [`CommandQueue::flush`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Batches executed.
    pub batches: usize,
    /// Commands that executed successfully.
    pub dispatched: usize,
    /// Commands the context reported as failed.
    pub failed: usize,
}

impl FlushReport {
    /// Returns `true` if every command succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Collects submitted batches and replays them on a render context.
#[derive(Debug, Default)]
pub struct CommandQueue {
    batches: Vec<SubmittedBatch>,
}

impl CommandQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` batches.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            batches: Vec::with_capacity(capacity),
        }
    }

    /// Creates a new open batch.
    pub fn create_batch(&self) -> CommandBatch {
        CommandBatch::new()
    }

    /// Records `command` into `batch`.
    pub fn add_command(
        &self,
        batch: &mut CommandBatch,
        command: Command,
        payload: Option<&[u8]>,
    ) {
        batch.push(command, payload);
    }

    /// Submits `batch` for execution at `priority`.
    pub fn submit_batch(&mut self, priority: SortKey, batch: CommandBatch) {
        self.batches.push(SubmittedBatch { priority, batch });
    }

    /// Orders submitted batches by ascending priority.
    ///
    /// The sort is stable: batches with equal priority keep their submission
    /// order, and commands inside a batch are never reordered.
    pub fn sort(&mut self) {
        self.batches.sort_by_key(|submitted| submitted.priority);
    }

    /// Executes every submitted batch on `context`, then empties the queue.
    ///
    /// Batches run in their current order: sorted if [`sort`](Self::sort) was
    /// called, submission order otherwise. A failing command is logged and
    /// skipped; the commands after it still run.
    pub fn flush(&mut self, context: &mut dyn RenderContext) -> FlushReport {
        let mut report = FlushReport::default();

        for submitted in self.batches.drain(..) {
            report.batches += 1;
            for (command, payload) in submitted.batch.iter() {
                match dispatch(context, command, payload) {
                    Ok(()) => report.dispatched += 1,
                    Err(err) => {
                        log::warn!("Command {command:?} failed: {err}");
                        report.failed += 1;
                    }
                }
            }
        }

        log::trace!(
            "Flushed {} batches ({} commands, {} failed)",
            report.batches,
            report.dispatched + report.failed,
            report.failed
        );
        report
    }

    /// Number of batches waiting to execute.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Returns `true` if nothing is waiting to execute.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_keeps_payloads_separate() {
        let mut batch = CommandBatch::new();
        batch.push(
            Command::BufferUpdate {
                buffer: BufferHandle(1),
            },
            Some(&[1, 2, 3]),
        );
        batch.push(
            Command::TextureResolve {
                source: TextureHandle(1),
                destination: TextureHandle(2),
            },
            None,
        );
        batch.push(
            Command::BufferUpdate {
                buffer: BufferHandle(2),
            },
            Some(&[4, 5]),
        );

        let payloads: Vec<Option<&[u8]>> = batch.iter().map(|(_, payload)| payload).collect();
        assert_eq!(payloads, vec![Some(&[1u8, 2, 3][..]), None, Some(&[4u8, 5][..])]);
    }

    #[test]
    fn empty_payload_is_not_missing() {
        let mut batch = CommandBatch::new();
        batch.push(
            Command::BufferUpdate {
                buffer: BufferHandle(1),
            },
            Some(&[]),
        );
        let (_, payload) = batch.iter().next().unwrap();
        assert_eq!(payload, Some(&[][..]));
    }

    #[test]
    fn sort_is_stable_for_equal_priorities() {
        let mut queue = CommandQueue::new();
        for tag in 0..4 {
            let mut batch = queue.create_batch();
            queue.add_command(
                &mut batch,
                Command::BufferUpdate {
                    buffer: BufferHandle(tag),
                },
                None,
            );
            queue.submit_batch(if tag == 2 { 0 } else { 1 }, batch);
        }

        queue.sort();

        let order: Vec<usize> = queue
            .batches
            .iter()
            .map(|submitted| match submitted.batch.iter().next() {
                Some((Command::BufferUpdate { buffer }, _)) => buffer.0,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(order, vec![2, 0, 1, 3]);
    }
}
