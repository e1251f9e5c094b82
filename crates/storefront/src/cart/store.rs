//! Key/value storage for the serialized cart.
//!
//! The cart only ever needs "read the blob under this key" and "replace the
//! blob under this key", the same contract as browser local storage. Storage
//! is abstracted behind [`CartStore`] so the container can be exercised with
//! [`MemoryStore`] and persisted with [`FileStore`].
//!
//! ## Storage Format
//!
//! For `FileStore`, one file per key in the data directory:
//! ```text
//! .garden/
//! └── cart_3Av1.json      # {"items":[...]} for key "cart:v1"
//! ```
//!
//! Key bytes outside `[A-Za-z0-9.-]` are written as `_XX` (uppercase hex), so
//! distinct keys never share a file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors raised by a storage backend.
///
/// The cart swallows these; they exist so backends can report what went
/// wrong and the cart can log it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Abstract key/value storage for serialized carts.
pub trait CartStore {
    /// Read the blob stored under `key`, `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError>;
}

impl<T: CartStore + ?Sized> CartStore for &T {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        (**self).write(key, blob)
    }
}

impl<T: CartStore + ?Sized> CartStore for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        (**self).write(key, blob)
    }
}

/// In-memory storage. Clones share the same entries, so a clone handed to a
/// new cart behaves like storage that survived a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, blob: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), blob.to_owned());
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

impl CartStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_owned(), blob.to_owned());
        Ok(())
    }
}

/// File-backed storage: one JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{byte:02X}"));
            }
        }
        self.root.join(format!("{name}.json"))
    }
}

impl CartStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        // Write-then-rename so a crash never leaves a half-written cart.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
