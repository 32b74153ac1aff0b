use std::path::PathBuf;

use crate::args::Args;
use crate::domain::{
    CreateBucketOutcome, DeploymentReport, DeploymentTarget, FILE_MANIFEST, PolicyDocument,
    UploadSummary, WebsiteConfig,
};
use crate::errors::DeployError;
use crate::infra::S3Storage;
use crate::ports::StoragePort;
use crate::utils::log_utils::Logger;

const RULE: &str = "============================================================";

/// Runs one deployment of the file manifest into a website bucket.
///
/// Holds the region and the account identity resolved at construction; a
/// `Deployer` cannot exist without verified credentials.
pub struct Deployer {
    storage: Box<dyn StoragePort>,
    region: String,
    account_id: String,
    source_dir: PathBuf,
    strict: bool,
    logger: Logger,
}

impl Deployer {
    /// Verify credentials through `storage` and build a deployer for `region`.
    ///
    /// # Errors
    /// Returns `DeployError::Credentials` if the identity call fails.
    pub fn connect(
        storage: Box<dyn StoragePort>,
        region: impl Into<String>,
        logger: &Logger,
    ) -> Result<Self, DeployError> {
        let identity = storage.caller_identity().map_err(|e| match e {
            DeployError::Credentials(msg) => DeployError::Credentials(msg),
            other => DeployError::Credentials(other.to_string()),
        })?;

        logger.normal(&format!(
            "AWS credentials found (Account: {})",
            identity.account_id
        ));

        Ok(Self {
            storage,
            region: region.into(),
            account_id: identity.account_id,
            source_dir: PathBuf::from("."),
            strict: false,
            logger: logger.clone(),
        })
    }

    /// Directory the manifest files are read from (defaults to `.`)
    #[must_use]
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Escalate hosting and policy failures from warnings to errors
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// # Errors
    /// `DeployError::BucketOwnedByOther` when the name is taken by another
    /// account, `DeployError::CreateBucket` for anything else S3 rejects.
    pub fn create_bucket(&self, bucket: &str) -> Result<CreateBucketOutcome, DeployError> {
        self.logger
            .normal(&format!("\nCreating S3 bucket: {bucket}..."));

        let outcome = self.storage.create_bucket(bucket, &self.region)?;
        match outcome {
            CreateBucketOutcome::Created => {
                self.logger.normal(&format!("Bucket created: {bucket}"));
            }
            CreateBucketOutcome::AlreadyOwnedByYou => {
                self.logger
                    .normal(&format!("Bucket exists and is owned by you: {bucket}"));
            }
        }
        Ok(outcome)
    }

    /// # Errors
    /// Returns `DeployError::Hosting` if S3 rejects the website configuration.
    pub fn enable_static_hosting(&self, bucket: &str) -> Result<(), DeployError> {
        self.logger.normal("\nEnabling static website hosting...");
        self.storage
            .put_bucket_website(bucket, &WebsiteConfig::single_page_app())?;
        self.logger.normal("Static website hosting enabled");
        Ok(())
    }

    /// # Errors
    /// Returns `DeployError::Policy` if S3 rejects the bucket policy.
    pub fn make_public(&self, bucket: &str) -> Result<(), DeployError> {
        self.logger.normal("\nMaking bucket public...");
        let policy = PolicyDocument::public_read(bucket).to_json()?;
        self.logger.debug(&format!("Bucket policy: {policy}"));
        self.storage.put_bucket_policy(bucket, &policy)?;
        self.logger.normal("Bucket policy set to public");
        Ok(())
    }

    /// Upload every manifest entry; a missing or failed file is reported and skipped.
    pub fn upload_files(&self, bucket: &str) -> UploadSummary {
        self.logger.normal("\nUploading files...");
        let mut summary = UploadSummary::default();

        for entry in &FILE_MANIFEST {
            let local_path = self.source_dir.join(entry.file_name);
            if !local_path.is_file() {
                self.logger
                    .error(&format!("File not found: {}", local_path.display()));
                summary.missing.push(entry.file_name);
                continue;
            }

            match self
                .storage
                .put_object(bucket, entry.file_name, &local_path, entry.content_type)
            {
                Ok(()) => {
                    self.logger.normal(&format!("Uploaded: {}", entry.file_name));
                    summary.uploaded.push(entry.file_name);
                }
                Err(e) => {
                    self.logger
                        .error(&format!("Error uploading {}: {e}", entry.file_name));
                    summary.failed.push((entry.file_name, e.to_string()));
                }
            }
        }

        self.logger.info(&format!(
            "Uploaded {} of {} files",
            summary.uploaded.len(),
            FILE_MANIFEST.len()
        ));
        summary
    }

    /// Create (optionally), configure hosting and policy, upload, then report.
    ///
    /// # Errors
    /// Fatal bucket-creation errors, `DeployError::IncompleteUpload` when any
    /// manifest entry was not uploaded, and hosting/policy errors in strict mode.
    pub fn deploy(&self, bucket: &str, create: bool) -> Result<DeploymentReport, DeployError> {
        self.logger.normal(&format!("\n{RULE}"));
        self.logger.normal("S3 STATIC SITE DEPLOYMENT");
        self.logger.normal(RULE);
        self.logger.info(&format!(
            "bucket={bucket} region={} source={}",
            self.region,
            self.source_dir.display()
        ));

        let bucket_created = if create {
            Some(self.create_bucket(bucket)?)
        } else {
            None
        };

        let mut warnings = Vec::new();
        self.tolerate(self.enable_static_hosting(bucket), &mut warnings)?;
        self.tolerate(self.make_public(bucket), &mut warnings)?;

        let uploads = self.upload_files(bucket);
        if !uploads.all_uploaded() {
            self.logger.error("Deployment incomplete");
            return Err(DeployError::IncompleteUpload {
                uploaded: uploads.uploaded.len(),
                expected: FILE_MANIFEST.len(),
            });
        }

        let target = DeploymentTarget::new(bucket, self.region.clone());
        let website_url = target.website_url();
        let console_url = target.console_url();

        self.logger.normal(&format!("\n{RULE}"));
        self.logger.normal("DEPLOYMENT SUCCESSFUL!");
        self.logger.normal(RULE);
        if !warnings.is_empty() {
            self.logger.warn(&format!(
                "Completed with {} warning(s); the site may not be publicly reachable",
                warnings.len()
            ));
        }
        self.logger.normal("\nYour app is live at:");
        self.logger.normal(&format!("   {website_url}"));
        self.logger.normal(&format!("\nS3 Console: {console_url}"));

        Ok(DeploymentReport {
            target,
            bucket_created,
            uploads,
            warnings,
            website_url,
            console_url,
        })
    }

    fn tolerate(
        &self,
        result: Result<(), DeployError>,
        warnings: &mut Vec<String>,
    ) -> Result<(), DeployError> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if self.strict => Err(e),
            Err(e) => {
                self.logger.warn(&e.to_string());
                warnings.push(e.to_string());
                Ok(())
            }
        }
    }
}

/// Remediation printed when credentials cannot be resolved or verified
#[must_use]
pub fn credentials_help() -> String {
    let credentials_file = home::home_dir()
        .map(|h| h.join(".aws").join("credentials").display().to_string())
        .unwrap_or_else(|| "~/.aws/credentials".to_string());

    format!(
        "To set up credentials, create a file at:\n   {credentials_file}\n\n\
         With content:\n   [default]\n   aws_access_key_id = YOUR_KEY_ID\n   \
         aws_secret_access_key = YOUR_SECRET_KEY\n\n\
         Or set environment variables:\n   AWS_ACCESS_KEY_ID=YOUR_KEY_ID\n   \
         AWS_SECRET_ACCESS_KEY=YOUR_SECRET_KEY"
    )
}

/// Connect to S3 with the standard credential chain and deploy per `args`.
///
/// # Errors
/// Propagates any fatal `DeployError`.
pub fn run_app(args: &Args) -> Result<DeploymentReport, DeployError> {
    let logger = Logger::new(args.verbose);
    let storage = S3Storage::connect(&args.region, &logger)?;
    let deployer = Deployer::connect(Box::new(storage), args.region.clone(), &logger)?
        .with_source_dir(&args.path)
        .with_strict(args.strict);
    deployer.deploy(&args.bucket, args.create)
}
