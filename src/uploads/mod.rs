//! Profile-picture storage
//!
//! One buffered write to local disk per upload, named
//! `{user_id}-{unix_millis}.{ext}`. Concurrent uploads by the same
//! identity produce distinct files; the profile's pointer reflects
//! whichever write lands last.

mod errors;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

pub use errors::{UploadError, UploadResult};

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Local picture store rooted at the uploads directory
#[derive(Debug, Clone)]
pub struct PictureStore {
    root: PathBuf,
}

impl PictureStore {
    /// Size cap per upload (5 MB)
    pub const MAX_BYTES: usize = 5_000_000;

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the uploads directory if it does not exist (startup)
    pub fn ensure_root(&self) -> UploadResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| UploadError::Io(e.to_string()))
    }

    /// Store one picture and return its file name. Rejects oversized
    /// files and extensions off the allow-list before touching disk.
    pub fn store(
        &self,
        user_id: Uuid,
        original_name: &str,
        data: &[u8],
    ) -> UploadResult<String> {
        if data.is_empty() {
            return Err(UploadError::MissingFile);
        }
        if data.len() > Self::MAX_BYTES {
            return Err(UploadError::FileTooLarge(Self::MAX_BYTES));
        }

        let ext = extension(original_name)
            .ok_or_else(|| UploadError::BadExtension(String::new()))?;
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(UploadError::BadExtension(ext));
        }

        self.ensure_root()?;

        let file_name = format!("{}-{}.{}", user_id, Utc::now().timestamp_millis(), ext);
        fs::write(self.root.join(&file_name), data)
            .map_err(|e| UploadError::Io(e.to_string()))?;

        Ok(file_name)
    }

    /// Web path under which a stored file is served
    pub fn web_path(file_name: &str) -> String {
        format!("/uploads/{}", file_name)
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}
