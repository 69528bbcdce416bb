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

use crate::renderer::api::{ShaderStage, TextureDescriptor, VertexAttribute};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the signature that prefixes every container.
pub const SIGNATURE_LEN: usize = 4;

/// An error raised while reading or writing a resource container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The data is shorter than a signature.
    TooShort,
    /// The data starts with the wrong signature.
    SignatureMismatch {
        /// The signature the reader expected.
        expected: [u8; SIGNATURE_LEN],
        /// The bytes actually found.
        found: [u8; SIGNATURE_LEN],
    },
    /// The payload could not be decoded.
    Decode(String),
    /// The payload could not be encoded.
    Encode(String),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::TooShort => write!(f, "Data too short to hold a signature"),
            ContainerError::SignatureMismatch { expected, found } => write!(
                f,
                "Signature mismatch: expected '{}', found '{}'",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(found)
            ),
            ContainerError::Decode(details) => write!(f, "Failed to decode payload: {details}"),
            ContainerError::Encode(details) => write!(f, "Failed to encode payload: {details}"),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Checks that `bytes` starts with `expected` and returns what follows.
pub fn strip_signature(
    bytes: &[u8],
    expected: [u8; SIGNATURE_LEN],
) -> Result<&[u8], ContainerError> {
    if bytes.len() < SIGNATURE_LEN {
        return Err(ContainerError::TooShort);
    }
    let (head, rest) = bytes.split_at(SIGNATURE_LEN);
    if head != expected {
        let mut found = [0u8; SIGNATURE_LEN];
        found.copy_from_slice(head);
        return Err(ContainerError::SignatureMismatch { expected, found });
    }
    Ok(rest)
}

/// A payload type stored behind a fixed signature.
pub trait Container: Serialize + DeserializeOwned {
    /// The four bytes that open every file of this kind.
    const SIGNATURE: [u8; SIGNATURE_LEN];

    /// Serializes the container, signature first.
    fn encode(&self) -> Result<Vec<u8>, ContainerError> {
        let payload = bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| ContainerError::Encode(e.to_string()))?;
        let mut bytes = Vec::with_capacity(SIGNATURE_LEN + payload.len());
        bytes.extend_from_slice(&Self::SIGNATURE);
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Verifies the signature, then decodes the payload.
    fn decode(bytes: &[u8]) -> Result<Self, ContainerError> {
        let payload = strip_signature(bytes, Self::SIGNATURE)?;
        let (value, _): (Self, _) =
            bincode::serde::decode_from_slice(payload, bincode::config::standard())
                .map_err(|e| ContainerError::Decode(e.to_string()))?;
        Ok(value)
    }
}

/// A texture file: its descriptor and one block of texels per array slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContainer {
    /// Format and dimensions.
    pub descriptor: TextureDescriptor,
    /// Texel data for each array slice, in order.
    pub slices: Vec<Vec<u8>>,
}

impl Container for ImageContainer {
    const SIGNATURE: [u8; SIGNATURE_LEN] = *b"TSTX";
}

/// The bytecode of one shader stage.
///
/// The bytecode itself starts with the stage signature (see
/// [`ShaderStage::signature`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderStageBlob {
    /// The stage this bytecode belongs to.
    pub stage: ShaderStage,
    /// Signature-prefixed bytecode.
    pub bytecode: Vec<u8>,
}

impl ShaderStageBlob {
    /// Wraps raw bytecode, prefixing it with the stage signature.
    pub fn new(stage: ShaderStage, code: &[u8]) -> Self {
        let mut bytecode = Vec::with_capacity(SIGNATURE_LEN + code.len());
        bytecode.extend_from_slice(&stage.signature());
        bytecode.extend_from_slice(code);
        Self { stage, bytecode }
    }

    /// Verifies the stage signature and returns the bytecode after it.
    pub fn code(&self) -> Result<&[u8], ContainerError> {
        strip_signature(&self.bytecode, self.stage.signature())
    }
}

/// A shader program file: one blob per present stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderContainer {
    /// Stage bytecode, at most one per stage.
    pub stages: Vec<ShaderStageBlob>,
}

impl Container for ShaderContainer {
    const SIGNATURE: [u8; SIGNATURE_LEN] = *b"TSSH";
}

/// A sub-range of a model's shared vertex and index data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMesh {
    /// Value added to every index of this mesh.
    pub vertex_base: i32,
    /// First vertex, for non-indexed meshes.
    pub vertex_start: u32,
    /// Number of vertices.
    pub vertex_count: u32,
    /// First index.
    pub index_start: u32,
    /// Number of indices; zero for non-indexed meshes.
    pub index_count: u32,
}

/// A model file: interleaved vertices, 32-bit indices and mesh ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelContainer {
    /// Bytes per vertex.
    pub vertex_stride: u32,
    /// Layout of one vertex.
    pub attributes: Vec<VertexAttribute>,
    /// Interleaved vertex data.
    pub vertices: Vec<u8>,
    /// Index data.
    pub indices: Vec<u32>,
    /// Mesh ranges.
    pub meshes: Vec<ModelMesh>,
}

impl Container for ModelContainer {
    const SIGNATURE: [u8; SIGNATURE_LEN] = *b"TSMD";
}
