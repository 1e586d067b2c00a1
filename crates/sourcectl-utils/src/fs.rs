use std::{fs, path::Path};

use crate::error::{FileSystemError, FileSystemResult};

pub trait FileSystemProvider {
    /// Writes `contents` to the file at `path`, replacing any existing content.
    ///
    /// Missing parent directories are created first. The write is not atomic: a
    /// failure part-way through may leave a truncated file behind.
    ///
    /// # Errors
    ///
    /// * [`FileSystemError::Directory`] if a parent directory could not be created.
    /// * [`FileSystemError::NotADirectory`] if a parent path exists but is not a directory.
    /// * [`FileSystemError::File`] if the file itself could not be written.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sourcectl_utils::error::FileSystemResult;
    /// use sourcectl_utils::fs::{FileSystemProvider, StandardFileSystemProvider};
    ///
    /// fn main() -> FileSystemResult<()> {
    ///     let fs = StandardFileSystemProvider;
    ///     fs.write_file("/tmp/sourcectl/sources.json", "{}")?;
    ///     Ok(())
    /// }
    /// ```
    fn write_file<P: AsRef<Path>>(&self, path: P, contents: &str) -> FileSystemResult<()>;

    /// Creates a directory structure if it doesn't exist.
    ///
    /// If the directory already exists, this function does nothing.
    ///
    /// # Errors
    ///
    /// * [`FileSystemError::Directory`] if the directory could not be created.
    /// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()>;
}

#[derive(Default, Clone)]
pub struct StandardFileSystemProvider;

impl FileSystemProvider for StandardFileSystemProvider {
    fn write_file<P: AsRef<Path>>(&self, path: P, contents: &str) -> FileSystemResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.ensure_dir_exists(parent)?;
        }

        fs::write(path, contents).map_err(|err| {
            FileSystemError::File {
                path: path.to_path_buf(),
                action: "write",
                source: err,
            }
        })
    }

    fn ensure_dir_exists<P: AsRef<Path>>(&self, path: P) -> FileSystemResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).map_err(|err| {
                FileSystemError::Directory {
                    path: path.to_path_buf(),
                    action: "create",
                    source: err,
                }
            })?;
        } else if !path.is_dir() {
            return Err(FileSystemError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }
}

/// Writes a file using [`StandardFileSystemProvider`].
///
/// See [`FileSystemProvider::write_file`] for detailed documentation.
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> FileSystemResult<()> {
    StandardFileSystemProvider.write_file(path, contents)
}
