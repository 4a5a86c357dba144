use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::backend::{Backend, HealthStatus};
use crate::error::{StorageError, StorageResult, validate_key};

/// [`Backend`] that maps keys to files below a base directory.
///
/// Colons in a key become directory separators (`rooms:room1:messages:msg001`
/// → `<base>/rooms/room1/messages/msg001`). Writes go to a sibling temp file
/// and are renamed into place so a reader never observes a partial write.
#[derive(Debug, Clone)]
pub struct FilesystemBackend {
    base_path: PathBuf,
}

impl FilesystemBackend {
    /// Creates a backend rooted at `base_path`. The directory is not
    /// created until the first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// The directory this backend is rooted at.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let mut path = self.base_path.clone();
        for segment in key.split(':') {
            path.push(segment);
        }
        path
    }

    fn key_from_relpath(relpath: &Path) -> String {
        relpath
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(":")
    }

    async fn write_atomic(path: &Path, value: &[u8]) -> StorageResult<()> {
        let parent = path
            .parent()
            .ok_or_else(|| StorageError::IOError("key maps to a path with no parent".into()))?;
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::IOError(e.to_string()))?;

        let suffix: u64 = rand::thread_rng().r#gen();
        let tmp_path = parent.join(format!(
            ".{}.tmp-{suffix:016x}",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "entry".to_string())
        ));

        let mut file = fs::File::create(&tmp_path)
            .await
            .map_err(|e| StorageError::IOError(e.to_string()))?;
        file.write_all(value)
            .await
            .map_err(|e| StorageError::IOError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StorageError::IOError(e.to_string()))?;
        drop(file);

        fs::rename(&tmp_path, path).await.map_err(|e| {
            StorageError::IOError(format!("atomic rename failed: {e}"))
        })
    }

    async fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> StorageResult<()> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StorageError::IOError(e.to_string())),
        };
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::IOError(e.to_string()))?
        {
            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.starts_with('.') {
                continue;
            }
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StorageError::IOError(e.to_string()))?;
            if file_type.is_dir() {
                Box::pin(Self::walk(&path, out)).await?;
            } else {
                out.push(path);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FilesystemBackend {
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        validate_key(key)?;
        let path = self.key_path(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::IOError(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StorageResult<()> {
        validate_key(key)?;
        let path = self.key_path(key);
        Self::write_atomic(&path, &value).await
    }

    async fn set_if_not_exists(&self, key: &str, value: Vec<u8>) -> StorageResult<bool> {
        validate_key(key)?;
        let path = self.key_path(key);
        let parent = path
            .parent()
            .ok_or_else(|| StorageError::IOError("key maps to a path with no parent".into()))?;
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::IOError(e.to_string()))?;

        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(&value)
                    .await
                    .map_err(|e| StorageError::IOError(e.to_string()))?;
                file.flush()
                    .await
                    .map_err(|e| StorageError::IOError(e.to_string()))?;
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StorageError::AlreadyExists(key.to_string()))
            }
            Err(e) => Err(StorageError::IOError(e.to_string())),
        }
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let path = self.key_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IOError(e.to_string())),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        Ok(fs::try_exists(self.key_path(key))
            .await
            .unwrap_or(false))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut files = Vec::new();
        Self::walk(&self.base_path, &mut files).await?;
        let mut keys = Vec::with_capacity(files.len());
        for path in files {
            let relpath = path
                .strip_prefix(&self.base_path)
                .unwrap_or(&path)
                .to_path_buf();
            let key = Self::key_from_relpath(&relpath);
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        if let Err(e) = fs::create_dir_all(&self.base_path).await {
            return Ok(HealthStatus::unhealthy(format!(
                "cannot create base path: {e}"
            )));
        }
        let probe = self.base_path.join(".masc-health-probe");
        match fs::write(&probe, b"ok").await {
            Ok(()) => {
                let _ = fs::remove_file(&probe).await;
                Ok(HealthStatus::healthy())
            }
            Err(e) => Ok(HealthStatus::unhealthy(format!("base path not writable: {e}"))),
        }
    }
}
