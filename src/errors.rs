use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("AWS credentials error: {0}")]
    Credentials(String),

    #[error("Bucket '{0}' already exists (owned by another AWS account), use a different bucket name")]
    BucketOwnedByOther(String),

    #[error("Error creating bucket: {0}")]
    CreateBucket(String),

    #[error("Static website hosting error: {0}")]
    Hosting(String),

    #[error("Bucket policy error: {0}")]
    Policy(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Deployment incomplete: uploaded {uploaded} of {expected} files")]
    IncompleteUpload { uploaded: usize, expected: usize },

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeployError {
    /// Whether this error came from credential resolution or verification
    #[must_use]
    pub fn is_credentials(&self) -> bool {
        matches!(self, DeployError::Credentials(_))
    }
}
