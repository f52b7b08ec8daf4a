//! Per-request temporary directories.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

/// A `netscaff-{uuid}` directory under the configured temp root.
///
/// Successful requests keep the directory until [`Workspace::schedule_cleanup`]
/// fires so the archive can finish streaming; failed requests
/// [`Workspace::discard`] it right away.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    pub async fn create(root: &Path) -> io::Result<Self> {
        let path = root.join(format!("netscaff-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&path).await?;
        debug!(path = %path.display(), "Workspace created");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now.
    pub async fn discard(self) {
        remove(&self.path).await;
    }

    /// Remove the directory after `delay` on a background task.
    pub fn schedule_cleanup(self, delay: Duration) {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            remove(&self.path).await;
        });
    }
}

async fn remove(path: &Path) {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => debug!(path = %path.display(), "Workspace removed"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove workspace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_makes_a_unique_directory() {
        let root = tempfile::tempdir().unwrap();

        let a = Workspace::create(root.path()).await.unwrap();
        let b = Workspace::create(root.path()).await.unwrap();

        assert!(a.path().is_dir());
        assert_ne!(a.path(), b.path());
        assert!(
            a.path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("netscaff-")
        );
    }

    #[tokio::test]
    async fn discard_removes_immediately() {
        let root = tempfile::tempdir().unwrap();
        let workspace = Workspace::create(root.path()).await.unwrap();
        let path = workspace.path().to_path_buf();
        std::fs::write(path.join("Shop.zip"), b"zip").unwrap();

        workspace.discard().await;

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn scheduled_cleanup_waits_for_the_delay() {
        let root = tempfile::tempdir().unwrap();
        let workspace = Workspace::create(root.path()).await.unwrap();
        let path = workspace.path().to_path_buf();

        workspace.schedule_cleanup(Duration::from_millis(200));
        assert!(path.exists());

        let mut removed = false;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if !path.exists() {
                removed = true;
                break;
            }
        }
        assert!(removed, "{} survived its cleanup", path.display());
    }
}
