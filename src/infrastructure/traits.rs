//! I/O seams
//!
//! Services reach the filesystem and the registry slot only through these
//! traits, so tests can swap in in-memory stores or failing fakes.

use std::io;
use std::path::Path;

/// The file operations used for boundary datasets and registry slots.
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// `true` only for regular files (a directory named like a dataset is not one).
    fn is_file(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Replace `to` with `from`; atomic on the same filesystem.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create the parent directory of `path` if missing.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Single-slot string storage keyed by name.
///
/// Mirrors a browser-style key/value store: a slot is either absent or
/// holds one string, and `set` overwrites it in full.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Overwrite a slot.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// `std::fs` backed implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
