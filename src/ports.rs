use crate::domain::{CallerIdentity, CreateBucketOutcome, WebsiteConfig};
use crate::errors::DeployError;
use mockall::automock;
use std::path::Path;

/// Remote storage operations a deployment needs
#[automock]
pub trait StoragePort {
    /// Verify credentials with an authenticated call and report who we are
    fn caller_identity(&self) -> Result<CallerIdentity, DeployError>;

    /// `BucketAlreadyOwnedByYou` maps to `Ok`; a bucket owned elsewhere maps to
    /// `DeployError::BucketOwnedByOther`.
    fn create_bucket(&self, bucket: &str, region: &str) -> Result<CreateBucketOutcome, DeployError>;

    fn put_bucket_website(&self, bucket: &str, config: &WebsiteConfig) -> Result<(), DeployError>;

    fn put_bucket_policy(&self, bucket: &str, policy_json: &str) -> Result<(), DeployError>;

    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
        content_type: &str,
    ) -> Result<(), DeployError>;
}
