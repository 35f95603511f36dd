//! This module provides durable storages for appointment data

use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::traits::KeyValueStorage;


/// A storage that only lives in memory. Its contents are lost when it is dropped.
///
/// This is mostly useful for tests, or as a fallback when the actual storage cannot be used.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.items.get(key).cloned())
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}



/// A storage that keeps every key in its own JSON file, inside a given folder
#[derive(Clone, Debug, PartialEq)]
pub struct FileStorage {
    backing_folder: PathBuf,
}

impl FileStorage {
    /// Get the default folder for the storage files
    pub fn default_folder() -> PathBuf {
        PathBuf::from(String::from("clinic_data"))
    }

    /// Use `folder` as a backing folder. It will be created at the first write if it does not exist
    pub fn new(folder: &Path) -> Self {
        Self {
            backing_folder: PathBuf::from(folder),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.backing_folder
    }

    /// The file that stores the value of `key`
    pub fn file_for_key(&self, key: &str) -> PathBuf {
        let name = sanitize_filename::sanitize(key);
        self.backing_folder.join(format!("{}.json", name))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let path = self.file_for_key(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Unable to read file {:?}: {}", path, err).into()),
        }
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        if let Err(err) = std::fs::create_dir_all(&self.backing_folder) {
            return Err(format!("Unable to create folder {:?}: {}", self.backing_folder, err).into());
        }

        let path = self.file_for_key(key);
        if let Err(err) = std::fs::write(&path, value) {
            return Err(format!("Unable to save file {:?}: {}", path, err).into());
        }
        Ok(())
    }
}
