//! Upload guard for product images.
//!
//! Writes land in one fixed directory chosen at construction. The existence
//! check and the create are a single atomic `create_new` open, so two
//! concurrent uploads can never silently overwrite each other.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use vitrine_core::Notifier;

/// One uploaded file: the client-supplied name plus the full payload.
///
/// The name is reduced to its final path component on construction, so a
/// crafted name cannot escape the upload root.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    file_name: String,
    content: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl AsRef<str>, content: Vec<u8>) -> Self {
        let file_name = Path::new(file_name.as_ref())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { file_name, content }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// Fixed-directory store for uploaded media.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate `upload` and persist it as `{prefix}{file_name}` under the
    /// store's root.
    ///
    /// Returns `Ok(true)` when the file was written. Returns `Ok(false)` and
    /// collects a notification when the payload is empty, the name reduces to
    /// nothing, or the target name is already taken. Io faults propagate; a
    /// half-written file is removed before the error surfaces.
    pub async fn store(
        &self,
        upload: &ImageUpload,
        prefix: &str,
        notifier: &mut Notifier,
    ) -> io::Result<bool> {
        if upload.content.is_empty() || upload.file_name.is_empty() {
            notifier.notify("invalid file");
            return Ok(false);
        }

        fs::create_dir_all(&self.root).await?;
        let target = self.root.join(format!("{prefix}{}", upload.file_name));

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                notifier.notify("a file with this name already exists");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = write_all(&mut file, &upload.content).await {
            drop(file);
            let _ = fs::remove_file(&target).await;
            return Err(e);
        }

        Ok(true)
    }
}

async fn write_all(file: &mut fs::File, content: &[u8]) -> io::Result<()> {
    file.write_all(content).await?;
    file.flush().await
}
