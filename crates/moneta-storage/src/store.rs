//! The opaque string-keyed store and its bundled backends.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use moneta_core::CoreError;

const TMP_SUFFIX: &str = "tmp";

/// Abstraction over external string-keyed value stores.
///
/// Mirrors a browser `localStorage`-style contract: values are opaque
/// strings, keys are independent, and a write may fail (quota, I/O) without
/// affecting other keys.
pub trait StringStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Volatile in-memory store, mainly for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a key before hydration, for corrupt-payload scenarios.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}

impl StringStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self
            .entries
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Filesystem-backed store keeping one file per key under a root directory.
///
/// Writes go through a temporary sibling file and a rename, so a crashed
/// write never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.txt", canonical_key(key)))
    }
}

impl StringStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
