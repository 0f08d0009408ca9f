//! # Upload Errors

use thiserror::Error;

use crate::error::ApiError;

/// Result type for upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Profile-picture upload errors
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// Request carried no file field
    #[error("Please upload a file")]
    MissingFile,

    /// File exceeds the size cap
    #[error("File must be at most {0} bytes")]
    FileTooLarge(usize),

    /// Extension not on the allow-list
    #[error("Only jpg, jpeg, png, and gif files are allowed")]
    BadExtension(String),

    /// Filesystem failure
    #[error("Storage error: {0}")]
    Io(String),
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile
            | UploadError::FileTooLarge(_)
            | UploadError::BadExtension(_) => {
                ApiError::violation("profilePicture", err.to_string())
            }
            UploadError::Io(detail) => ApiError::Unexpected(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_validation() {
        for err in [
            UploadError::MissingFile,
            UploadError::FileTooLarge(5_000_000),
            UploadError::BadExtension("exe".into()),
        ] {
            assert_eq!(ApiError::from(err).status_code(), 400);
        }
        assert_eq!(
            ApiError::from(UploadError::Io("disk full".into())).status_code(),
            500
        );
    }
}
