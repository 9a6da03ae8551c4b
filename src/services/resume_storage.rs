// Resume storage - writes uploaded resumes to a local directory
use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::error::{AppError, Result};
use crate::utils::{file_extension, sanitize_filename};

#[derive(Debug, Clone)]
pub struct ResumeStorage {
    dir: PathBuf,
    max_bytes: usize,
}

impl ResumeStorage {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(&config.resume_dir, config.max_bytes)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// `<uuid>.<ext>`, used for resumes attached to an application.
    pub fn application_file_name(original: &str) -> String {
        match file_extension(original) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        }
    }

    /// `<uuid>_<original>`, used by the standalone upload endpoint.
    pub fn upload_file_name(original: &str) -> String {
        format!("{}_{}", Uuid::new_v4(), sanitize_filename(original))
    }

    /// Resolves a stored name inside the storage directory. Names carrying
    /// path components are rejected.
    pub fn path_of(&self, stored_name: &str) -> Result<PathBuf> {
        let valid = !stored_name.is_empty()
            && !stored_name.starts_with('.')
            && !stored_name.contains(|c: char| c == '/' || c == '\\')
            && sanitize_filename(stored_name) == stored_name;

        if !valid {
            return Err(AppError::BadRequest("Invalid file name".to_string()));
        }

        Ok(self.dir.join(stored_name))
    }

    /// Streams `chunks` into `stored_name`, returning the byte count. A
    /// partially written file is removed if the stream fails or exceeds the
    /// size limit.
    pub async fn write<S, B, E>(&self, stored_name: &str, chunks: S) -> Result<u64>
    where
        S: Stream<Item = std::result::Result<B, E>>,
        B: AsRef<[u8]>,
        AppError: From<E>,
    {
        let path = self.path_of(stored_name)?;
        self.ensure_dir().await?;

        let mut file = tokio::fs::File::create(&path).await?;
        let outcome = self.copy_chunks(&mut file, chunks).await;
        drop(file);

        if outcome.is_err() {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!("Failed to remove partial upload {}: {}", path.display(), e);
            }
        }

        outcome
    }

    async fn copy_chunks<S, B, E>(&self, file: &mut tokio::fs::File, chunks: S) -> Result<u64>
    where
        S: Stream<Item = std::result::Result<B, E>>,
        B: AsRef<[u8]>,
        AppError: From<E>,
    {
        let mut chunks = std::pin::pin!(chunks);
        let mut written: u64 = 0;

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            let bytes = chunk.as_ref();
            written += bytes.len() as u64;
            if written > self.max_bytes as u64 {
                return Err(AppError::PayloadTooLarge(self.max_bytes));
            }
            file.write_all(bytes).await?;
        }

        file.flush().await?;
        Ok(written)
    }

    pub async fn read(&self, stored_name: &str) -> Result<Vec<u8>> {
        let path = self.path_of(stored_name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best effort; used to roll back a file when its database insert fails.
    pub async fn remove(&self, stored_name: &str) {
        if let Ok(path) = self.path_of(stored_name) {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
}

/// MIME type for a stored resume, guessed from its extension.
pub fn resume_content_type(stored_name: &str) -> String {
    mime_guess::from_path(stored_name)
        .first_or_octet_stream()
        .to_string()
}
