use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const PREFS_FILE_NAME: &str = "stations_prefs.json";

/// 以單一 JSON 物件檔案保存的偏好設定
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl FileStore {
    /// 開啟（或建立）資料目錄下的偏好設定檔
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let dir = data_dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self::open_file(dir.join(PREFS_FILE_NAME)))
    }

    /// 檔案不存在或內容損壞時視為空的設定
    pub fn open_file<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Preferences file {} is corrupt, starting empty: {}",
                        path.display(),
                        e
                    );
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                tracing::warn!(
                    "⚠️ Could not read preferences file {}: {}",
                    path.display(),
                    e
                );
                Map::new()
            }
        };

        tracing::debug!(
            "Opened preferences at {} ({} keys)",
            path.display(),
            entries.len()
        );
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // 先寫暫存檔再 rename，讀者看不到寫到一半的檔案
    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_vec_pretty(&self.entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.entries.get(key).and_then(|v| v.as_bool())
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.entries.insert(key.to_string(), Value::Bool(value));
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum MemoryValue {
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, MemoryValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(MemoryValue::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .insert(key.to_string(), MemoryValue::Text(value.to_string()));
        Ok(())
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(MemoryValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.entries
            .insert(key.to_string(), MemoryValue::Flag(value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let mut store = FileStore::open(temp_dir.path()).unwrap();
        store.put_string("stations_json", "[]").unwrap();
        store.put_bool("threshold_checked", true).unwrap();

        let reopened = FileStore::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.get_string("stations_json").as_deref(), Some("[]"));
        assert_eq!(reopened.get_bool("threshold_checked"), Some(true));
        assert!(!temp_dir.path().join("stations_prefs.json.tmp").exists());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open_file(temp_dir.path().join("nope.json"));
        assert_eq!(store.get_string("stations_json"), None);
        assert_eq!(store.get_bool("threshold_checked"), None);
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(PREFS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::open_file(&path);
        assert_eq!(store.get_string("stations_json"), None);

        // 下一次寫入會覆蓋掉壞掉的檔案
        store.put_bool("threshold_checked", false).unwrap();
        let reopened = FileStore::open_file(&path);
        assert_eq!(reopened.get_bool("threshold_checked"), Some(false));
    }

    #[test]
    fn test_type_mismatch_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.put_bool("k", true).unwrap();
        assert_eq!(store.get_string("k"), None);
        store.put_string("k", "v").unwrap();
        assert_eq!(store.get_bool("k"), None);
        store.remove("k").unwrap();
        assert_eq!(store.get_string("k"), None);
    }
}
