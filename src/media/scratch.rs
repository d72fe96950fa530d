//! Scoped temporary files.
//!
//! Every per-request artefact (image copy, upload, synthesis output) is a
//! [`ScopedFile`]: a path that is deleted when the value is dropped, on every
//! exit path. [`ScopedFile::keep`] hands ownership of the file to the caller.

use std::path::{Path, PathBuf};

use tempfile::{Builder, TempPath};

/// Allocates scoped files in a configurable directory.
///
/// `None` means the system temp directory.
#[derive(Debug, Clone, Default)]
pub struct ScratchSpace {
    dir: Option<PathBuf>,
}

/// A temporary file path that is removed on drop.
#[derive(Debug)]
pub struct ScopedFile {
    path: TempPath,
}

impl ScopedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stop tracking the file and return its path; it will not be deleted.
    pub fn keep(self) -> std::io::Result<PathBuf> {
        self.path.keep().map_err(std::io::Error::from)
    }
}

impl ScratchSpace {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// Directory new files are created in.
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Create an empty, closed file with the given suffix.
    pub fn allocate(&self, suffix: &str) -> std::io::Result<ScopedFile> {
        let mut builder = Builder::new();
        builder.prefix("doctor-").suffix(suffix);
        let file = match &self.dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                builder.tempfile_in(dir)?
            }
            None => builder.tempfile()?,
        };
        Ok(ScopedFile {
            path: file.into_temp_path(),
        })
    }

    /// Copy a caller-owned image into a private `.jpg` file.
    ///
    /// Reading the copy instead of the original avoids permission and lock
    /// problems with upload paths owned by another process.
    pub async fn copy_image(&self, source: &Path) -> std::io::Result<ScopedFile> {
        let copy = self.allocate(".jpg")?;
        tokio::fs::copy(source, copy.path()).await?;
        Ok(copy)
    }

    /// Allocate the placeholder path synthesis writes its mp3 into.
    pub fn audio_output(&self) -> std::io::Result<ScopedFile> {
        self.allocate(".mp3")
    }

    /// Store uploaded bytes in a scoped file with the given suffix.
    pub async fn write(&self, suffix: &str, bytes: &[u8]) -> std::io::Result<ScopedFile> {
        let file = self.allocate(suffix)?;
        tokio::fs::write(file.path(), bytes).await?;
        Ok(file)
    }
}
