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

//! Resource requests sent from other threads to the render thread.
//!
//! Managers are owned by the render thread. Other threads ask for textures
//! and shaders through a [`LoaderHandle`]; the requests are served the next
//! time the render thread drains the [`LoadQueue`], and each result comes
//! back on the reply channel returned when the request was sent.

use crate::managers::{ShaderManager, TextureLoadFlags, TextureManager};
use std::path::PathBuf;
use vitrum_core::renderer::api::{ShaderId, TextureId};
use vitrum_core::renderer::{ManagerError, RenderError};

/// The receiving end of a load request.
pub type LoadReply<T> = flume::Receiver<Result<T, ManagerError>>;

/// A resource load to be performed on the render thread.
#[derive(Debug)]
pub enum LoadRequest {
    /// Load a texture file.
    Texture {
        /// Path relative to the texture root.
        path: PathBuf,
        /// Load options.
        flags: TextureLoadFlags,
        /// Where the result is sent.
        reply: flume::Sender<Result<TextureId, ManagerError>>,
    },
    /// Load a shader program by name.
    Shader {
        /// Program name, without extension.
        name: String,
        /// Where the result is sent.
        reply: flume::Sender<Result<ShaderId, ManagerError>>,
    },
}

/// A cloneable, thread-safe way to request loads.
#[derive(Debug, Clone)]
pub struct LoaderHandle {
    sender: flume::Sender<LoadRequest>,
}

impl LoaderHandle {
    /// Requests a texture load.
    ///
    /// ## Errors
    /// * `RenderError::NotInitialized` if the render thread has shut down.
    pub fn load_texture(
        &self,
        path: impl Into<PathBuf>,
        flags: TextureLoadFlags,
    ) -> Result<LoadReply<TextureId>, RenderError> {
        let (reply, receiver) = flume::bounded(1);
        self.send(LoadRequest::Texture {
            path: path.into(),
            flags,
            reply,
        })?;
        Ok(receiver)
    }

    /// Requests a shader program load.
    ///
    /// ## Errors
    /// * `RenderError::NotInitialized` if the render thread has shut down.
    pub fn load_shader(
        &self,
        name: impl Into<String>,
    ) -> Result<LoadReply<ShaderId>, RenderError> {
        let (reply, receiver) = flume::bounded(1);
        self.send(LoadRequest::Shader {
            name: name.into(),
            reply,
        })?;
        Ok(receiver)
    }

    fn send(&self, request: LoadRequest) -> Result<(), RenderError> {
        self.sender.send(request).map_err(|e| {
            log::error!("Failed to queue load request: {e}. The render thread is gone.");
            RenderError::NotInitialized
        })
    }
}

/// The render-thread side of the loader channel.
#[derive(Debug)]
pub struct LoadQueue {
    sender: flume::Sender<LoadRequest>,
    receiver: flume::Receiver<LoadRequest>,
}

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadQueue {
    /// Creates an empty, unbounded queue.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Returns a new handle feeding this queue.
    pub fn handle(&self) -> LoaderHandle {
        LoaderHandle {
            sender: self.sender.clone(),
        }
    }

    /// Number of requests waiting.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Serves every waiting request and returns how many were served.
    ///
    /// Replies whose requester has gone away are dropped silently.
    pub fn drain(&self, textures: &mut TextureManager, shaders: &mut ShaderManager) -> usize {
        let mut served = 0;
        for request in self.receiver.try_iter() {
            match request {
                LoadRequest::Texture { path, flags, reply } => {
                    let _ = reply.send(textures.load(&path, flags));
                }
                LoadRequest::Shader { name, reply } => {
                    let _ = reply.send(shaders.load(&name));
                }
            }
            served += 1;
        }
        if served > 0 {
            log::debug!("Served {served} load requests");
        }
        served
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::TryRecvError;

    #[test]
    fn detached_managers_report_null_manager() {
        let queue = LoadQueue::new();
        let handle = queue.handle();
        let texture = handle.load_texture("a.tex", TextureLoadFlags::empty()).unwrap();
        let shader = handle.load_shader("basic").unwrap();
        assert_eq!(queue.pending(), 2);

        let mut textures = TextureManager::default();
        let mut shaders = ShaderManager::default();
        assert_eq!(queue.drain(&mut textures, &mut shaders), 2);

        assert!(matches!(texture.try_recv(), Ok(Err(ManagerError::NullManager))));
        assert!(matches!(shader.try_recv(), Ok(Err(ManagerError::NullManager))));
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn reply_is_empty_until_drained() {
        let queue = LoadQueue::new();
        let reply = queue.handle().load_shader("basic").unwrap();
        assert!(matches!(reply.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn requests_fail_after_queue_drop() {
        let queue = LoadQueue::new();
        let handle = queue.handle();
        drop(queue);
        assert!(matches!(
            handle.load_shader("basic"),
            Err(RenderError::NotInitialized)
        ));
    }

    #[test]
    fn requests_cross_threads() {
        let queue = LoadQueue::new();
        let handle = queue.handle();
        let worker = std::thread::spawn(move || handle.load_shader("basic").unwrap());
        let reply = worker.join().unwrap();

        let mut textures = TextureManager::default();
        let mut shaders = ShaderManager::default();
        queue.drain(&mut textures, &mut shaders);
        assert!(reply.recv().unwrap().is_err());
    }
}
