//! Script storage behind the [`AssetStore`] seam.
//!
//! Migration scripts live in externally owned storage: a directory on disk,
//! or a table of assets embedded in the binary at compile time. The engine
//! only ever lists a namespace and opens named entries — it never owns the
//! storage lifecycle.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Read-only storage of named assets grouped under namespaces.
pub trait AssetStore {
    /// Lists entry names under a namespace.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the namespace cannot be enumerated. Callers
    /// degrade this to an empty listing.
    fn list(&self, namespace: &str) -> io::Result<Vec<String>>;

    /// Opens a named entry, returning its full contents, or `None` if the
    /// entry is absent or unreadable.
    fn open(&self, namespace: &str, name: &str) -> Option<String>;
}

/// An [`AssetStore`] over a directory tree; namespaces are subdirectories.
#[derive(Debug, Clone)]
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetStore for DirAssetStore {
    fn list(&self, namespace: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.root.join(namespace))? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        // read_dir order is platform-dependent; keep listings deterministic.
        names.sort();
        Ok(names)
    }

    fn open(&self, namespace: &str, name: &str) -> Option<String> {
        fs::read_to_string(self.root.join(namespace).join(name)).ok()
    }
}

/// An [`AssetStore`] over a compile-time table of `(name, contents)` pairs.
///
/// The embedded analog of a script directory, typically populated with
/// `include_str!` so scripts ship with the binary and cannot drift from the
/// code that depends on them. An embedded table covers a single namespace;
/// the namespace argument is not consulted.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAssets {
    assets: &'static [(&'static str, &'static str)],
}

impl EmbeddedAssets {
    /// Wraps a static asset table.
    pub const fn new(assets: &'static [(&'static str, &'static str)]) -> Self {
        Self { assets }
    }

    /// A store with no assets.
    pub const fn empty() -> Self {
        Self { assets: &[] }
    }
}

impl AssetStore for EmbeddedAssets {
    fn list(&self, _namespace: &str) -> io::Result<Vec<String>> {
        Ok(self.assets.iter().map(|(name, _)| name.to_string()).collect())
    }

    fn open(&self, _namespace: &str, name: &str) -> Option<String> {
        self.assets
            .iter()
            .find(|(asset_name, _)| *asset_name == name)
            .map(|(_, contents)| contents.to_string())
    }
}
