use super::KeyValueStorage;
use crate::error::{Result, TodoError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ITEM_EXT: &str = ".json";

/// Stores each key in its own file, `<root>/<escaped key>.json`.
///
/// Keys may contain any characters; everything outside `[A-Za-z0-9_-]` is
/// escaped as `%XX`, so distinct keys always map to distinct file names.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file backing `key`, whether or not it exists yet.
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{}", escape_key(key), ITEM_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TodoError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path).map_err(TodoError::Io)?;
        tracing::debug!(key, bytes = value.len(), "read storage item");
        Ok(Some(value))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.item_path(key);

        // Atomic Write
        let tmp = self.root.join(format!(".item-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, value).map_err(TodoError::Io)?;
        fs::rename(&tmp, &target).map_err(TodoError::Io)?;

        tracing::debug!(key, bytes = value.len(), "wrote storage item");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.item_path(key);
        if path.exists() {
            fs::remove_file(path).map_err(TodoError::Io)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(TodoError::Io)? {
            let entry = entry.map_err(TodoError::Io)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if let Some(stem) = name.strip_suffix(ITEM_EXT) {
                if let Some(key) = unescape_key(stem) {
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn unescape_key(escaped: &str) -> Option<String> {
    let bytes = escaped.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = escaped.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
