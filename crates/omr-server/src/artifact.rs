//! Temporary PDF files
//!
//! Each render writes to its own uniquely named file in the scratch
//! directory. The file is streamed back as the response body and removed
//! once the body is finished or dropped.

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Body;
use futures::stream;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Filename offered to the client
pub const DOWNLOAD_FILENAME: &str = "omr_sheet.pdf";

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
    cleanup: bool,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>, cleanup: bool) -> Self {
        Self {
            root: root.into(),
            cleanup,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn prepare(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Reserve a fresh path. Nothing is created on disk yet.
    pub fn allocate(&self) -> TempArtifact {
        let name = format!("omr_{}.pdf", Uuid::new_v4().simple());
        TempArtifact {
            path: self.root.join(name),
            cleanup: self.cleanup,
        }
    }
}

/// A scratch file removed when dropped (unless cleanup is disabled)
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
    cleanup: bool,
}

impl TempArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream the file as a response body. The artifact travels with the
    /// stream, so removal happens after the last chunk is read.
    pub async fn into_body(self) -> io::Result<Body> {
        let file = tokio::fs::File::open(&self.path).await?;

        let chunks = stream::try_unfold((file, self), |(mut file, artifact)| async move {
            let mut buf = vec![0u8; CHUNK_SIZE];
            let read = file.read(&mut buf).await?;
            if read == 0 {
                return Ok::<_, io::Error>(None);
            }
            buf.truncate(read);
            Ok::<_, io::Error>(Some((buf, (file, artifact))))
        });

        Ok(Body::from_stream(chunks))
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if !self.cleanup {
            return;
        }
        let path = std::mem::take(&mut self.path);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    report_removal(&path, tokio::fs::remove_file(&path).await);
                });
            }
            Err(_) => {
                let result = std::fs::remove_file(&path);
                report_removal(&path, result);
            }
        }
    }
}

fn report_removal(path: &Path, result: io::Result<()>) {
    match result {
        Ok(()) => debug!(path = %path.display(), "Removed temporary sheet"),
        // Render failed before anything was written
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove temporary sheet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocated_paths_are_unique() {
        let scratch = ScratchDir::new("/tmp/omr-test", true);
        let a = scratch.allocate();
        let b = scratch.allocate();

        assert_ne!(a.path(), b.path());
        assert_eq!(a.path().parent(), Some(scratch.root()));
        let name = a.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("omr_") && name.ends_with(".pdf"));
    }

    #[test]
    fn test_drop_outside_runtime_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::new(dir.path(), true);
        let artifact = scratch.allocate();
        let path = artifact.path().to_owned();
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_keep_artifacts_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::new(dir.path(), false);
        let artifact = scratch.allocate();
        let path = artifact.path().to_owned();
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        drop(artifact);
        assert!(path.exists());
    }
}
