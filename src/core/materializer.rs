// src/core/materializer.rs

use std::path::Path;
use thiserror::Error;

use crate::system::fs::FileSystem;

#[derive(Error, Debug)]
pub enum MaterializeError {
    /// The target file exists and the force flag was not set.
    #[error("A file already exists at '{path}'. Re-run with --force to overwrite it.")]
    FileConflict { path: String },
    #[error("Filesystem error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The target file was not present after the write call returned.
    #[error("Write to '{path}' could not be verified.")]
    Unverified { path: String },
}

/// Creates directories on demand and writes new files, refusing to clobber
/// existing ones unless forced. Side effects are restricted to the target
/// path and its ancestor directories.
#[derive(Debug)]
pub struct FileMaterializer<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> FileMaterializer<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Creates `path` and all missing ancestors. A no-op if it exists.
    pub fn ensure_directory(&self, path: &Path) -> Result<(), MaterializeError> {
        if self.fs.exists(path) {
            return Ok(());
        }
        self.fs.create_dir_all(path).map_err(|e| MaterializeError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Fails with `FileConflict` when `path` exists and `force` is false.
    pub fn assert_absent(&self, path: &Path, force: bool) -> Result<(), MaterializeError> {
        if self.fs.exists(path) && !force {
            return Err(MaterializeError::FileConflict {
                path: path.display().to_string(),
            });
        }
        Ok(())
    }

    /// Writes `content` to `path`, overwriting if present. Success is only
    /// reported once the file is verified to exist post-write.
    pub fn write_file(&self, path: &Path, content: &str) -> Result<(), MaterializeError> {
        self.fs.write(path, content).map_err(|e| MaterializeError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        if !self.fs.exists(path) {
            return Err(MaterializeError::Unverified {
                path: path.display().to_string(),
            });
        }
        Ok(())
    }
}
