//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use stencil_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StencilError, StencilResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::WriteFailure {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_are_visible_immediately() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("assets/dist/images");
        let file = dir.join(".gitkeep");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&file, b"").unwrap();

        assert!(fs.exists(&file));
        assert_eq!(std::fs::read(&file).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn last_write_wins() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let file = temp.path().join("package.json");

        fs.write_file(&file, b"old").unwrap();
        fs.write_file(&file, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
    }

    #[test]
    fn write_into_missing_parent_is_write_failure() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("missing/dir/file.txt");

        let err = LocalFilesystem::new().write_file(&file, b"x").unwrap_err();
        match err {
            StencilError::Application(ApplicationError::WriteFailure { path, .. }) => {
                assert_eq!(path, file)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
