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

//! Locates and reads resource files for the resource managers.
//!
//! A path is resolved in two steps: if it is absolute and names a file it is
//! used as is, otherwise it is joined onto the source's root directory. The
//! [`FileSource`] trait lets managers run against the real disk or an
//! in-memory set of files.

use std::collections::HashMap;
use std::fmt::Debug;
use std::io;
use std::path::{Path, PathBuf};

/// Where resource managers read their files from.
pub trait FileSource: Debug + Send + Sync {
    /// Resolves `path` against `root`, returning `None` if no file exists.
    fn resolve(&self, root: &Path, path: &Path) -> Option<PathBuf>;

    /// Reads a resolved file completely.
    fn read(&self, resolved: &Path) -> io::Result<Vec<u8>>;
}

/// Reads files from the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFileSource;

impl FileSource for DiskFileSource {
    fn resolve(&self, root: &Path, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() && path.is_file() {
            return Some(path.to_path_buf());
        }
        let joined = root.join(path);
        joined.is_file().then_some(joined)
    }

    fn read(&self, resolved: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(resolved)
    }
}

/// Serves files from memory, keyed by their full path.
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the file at `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl FileSource for MemoryFileSource {
    fn resolve(&self, root: &Path, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() && self.files.contains_key(path) {
            return Some(path.to_path_buf());
        }
        let joined = root.join(path);
        self.files.contains_key(&joined).then_some(joined)
    }

    fn read(&self, resolved: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(resolved)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, resolved.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_resolves_relative_to_root() {
        let source = MemoryFileSource::new().with_file("/assets/brick.tex", vec![1, 2]);

        let resolved = source.resolve(Path::new("/assets"), Path::new("brick.tex"));
        assert_eq!(resolved, Some(PathBuf::from("/assets/brick.tex")));
        assert_eq!(source.read(Path::new("/assets/brick.tex")).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_memory_source_prefers_existing_absolute_path() {
        let source = MemoryFileSource::new().with_file("/other/brick.tex", vec![3]);

        let resolved = source.resolve(Path::new("/assets"), Path::new("/other/brick.tex"));
        assert_eq!(resolved, Some(PathBuf::from("/other/brick.tex")));
        assert_eq!(source.resolve(Path::new("/assets"), Path::new("missing.tex")), None);
    }

    #[test]
    fn test_disk_source_reports_missing_file() {
        let root = std::env::temp_dir();
        let name = "vitrum-vfs-test-definitely-missing.bin";
        assert_eq!(DiskFileSource.resolve(&root, Path::new(name)), None);
    }

    #[test]
    fn test_disk_source_reads_relative_file() {
        let root = std::env::temp_dir().join(format!("vitrum-vfs-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("data.bin"), [7u8, 8, 9]).unwrap();

        let resolved = DiskFileSource
            .resolve(&root, Path::new("data.bin"))
            .expect("file should resolve");
        assert_eq!(DiskFileSource.read(&resolved).unwrap(), vec![7, 8, 9]);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
