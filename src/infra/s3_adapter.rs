use crate::domain::{CallerIdentity, CreateBucketOutcome, DEFAULT_REGION, WebsiteConfig};
use crate::errors::DeployError;
use crate::ports::StoragePort;
use crate::utils::log_utils::Logger;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration,
};
use std::path::Path;

/// Amazon S3 client used by the deployer, plus STS for the identity check
pub struct S3Storage {
    client: Client,
    sts: aws_sdk_sts::Client,
    runtime: tokio::runtime::Runtime,
    logger: Logger,
}

impl S3Storage {
    /// Load the standard AWS configuration for `region` and make sure credentials resolve.
    ///
    /// # Errors
    /// Returns `DeployError::Credentials` if no credentials can be resolved, or
    /// `DeployError::Runtime` if the async runtime cannot be created.
    pub fn connect(region: &str, logger: &Logger) -> Result<Self, DeployError> {
        let runtime = new_runtime()?;

        logger.debug(&format!("Loading AWS configuration for region {region}"));

        let sdk_config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .load(),
        );

        let provider = sdk_config.credentials_provider().ok_or_else(|| {
            DeployError::Credentials("no credentials provider is configured".to_string())
        })?;

        let credentials = runtime
            .block_on(provider.provide_credentials())
            .map_err(|e| DeployError::Credentials(DisplayErrorContext(&e).to_string()))?;

        logger.debug(&format!(
            "Resolved credentials, key ID: {}",
            masked_key_id(credentials.access_key_id())
        ));

        Ok(Self {
            client: Client::new(&sdk_config),
            sts: aws_sdk_sts::Client::new(&sdk_config),
            runtime,
            logger: logger.clone(),
        })
    }

    /// Wrap already-built clients, e.g. ones pointed at a custom endpoint.
    ///
    /// # Errors
    /// Returns `DeployError::Runtime` if the async runtime cannot be created.
    pub fn from_clients(
        client: Client,
        sts: aws_sdk_sts::Client,
        logger: &Logger,
    ) -> Result<Self, DeployError> {
        Ok(Self {
            client,
            sts,
            runtime: new_runtime()?,
            logger: logger.clone(),
        })
    }
}

fn new_runtime() -> Result<tokio::runtime::Runtime, DeployError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| DeployError::Runtime(format!("Failed to create runtime: {e}")))
}

/// First four characters of an access key ID followed by a mask
fn masked_key_id(key_id: &str) -> String {
    let prefix: String = key_id.chars().take(4).collect();
    format!("{prefix}****")
}

impl StoragePort for S3Storage {
    fn caller_identity(&self) -> Result<CallerIdentity, DeployError> {
        let output = self
            .runtime
            .block_on(self.sts.get_caller_identity().send())
            .map_err(|e| DeployError::Credentials(describe(&e)))?;

        let account_id = output
            .account()
            .ok_or_else(|| {
                DeployError::Credentials("GetCallerIdentity returned no account".to_string())
            })?
            .to_string();
        let display_name = output.arn().map(str::to_string);

        self.logger.debug(&format!(
            "Caller identity: {account_id} ({})",
            display_name.as_deref().unwrap_or("no ARN")
        ));

        Ok(CallerIdentity {
            account_id,
            display_name,
        })
    }

    fn create_bucket(&self, bucket: &str, region: &str) -> Result<CreateBucketOutcome, DeployError> {
        let mut request = self.client.create_bucket().bucket(bucket);

        // us-east-1 rejects an explicit location constraint
        if region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            );
        }

        self.logger
            .debug(&format!("CreateBucket request: bucket={bucket} region={region}"));

        match self.runtime.block_on(request.send()) {
            Ok(_) => Ok(CreateBucketOutcome::Created),
            Err(e) => classify_create_error(bucket, e.into_service_error()),
        }
    }

    fn put_bucket_website(&self, bucket: &str, config: &WebsiteConfig) -> Result<(), DeployError> {
        let index = IndexDocument::builder()
            .suffix(config.index_document)
            .build()
            .map_err(|e| DeployError::Hosting(e.to_string()))?;
        let error = ErrorDocument::builder()
            .key(config.error_document)
            .build()
            .map_err(|e| DeployError::Hosting(e.to_string()))?;
        let website = WebsiteConfiguration::builder()
            .index_document(index)
            .error_document(error)
            .build();

        self.logger.debug(&format!(
            "PutBucketWebsite request: bucket={bucket} index={} error={}",
            config.index_document, config.error_document
        ));

        self.runtime
            .block_on(
                self.client
                    .put_bucket_website()
                    .bucket(bucket)
                    .website_configuration(website)
                    .send(),
            )
            .map_err(|e| DeployError::Hosting(describe(&e)))?;
        Ok(())
    }

    fn put_bucket_policy(&self, bucket: &str, policy_json: &str) -> Result<(), DeployError> {
        self.logger
            .debug(&format!("PutBucketPolicy request: bucket={bucket}"));

        self.runtime
            .block_on(
                self.client
                    .put_bucket_policy()
                    .bucket(bucket)
                    .policy(policy_json)
                    .send(),
            )
            .map_err(|e| DeployError::Policy(describe(&e)))?;
        Ok(())
    }

    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        local_path: &Path,
        content_type: &str,
    ) -> Result<(), DeployError> {
        self.logger.debug(&format!(
            "PutObject request: bucket={bucket} key={key} content-type={content_type} from {}",
            local_path.display()
        ));

        self.runtime.block_on(async {
            // Stream from disk rather than loading the file into memory
            let body = ByteStream::from_path(local_path).await.map_err(|e| {
                DeployError::Upload(format!(
                    "Failed to read {}: {}",
                    local_path.display(),
                    DisplayErrorContext(&e)
                ))
            })?;

            let response = self
                .client
                .put_object()
                .bucket(bucket)
                .key(key)
                .content_type(content_type)
                .body(body)
                .send()
                .await
                .map_err(|e| DeployError::Upload(format!("{key}: {}", describe(&e))))?;

            self.logger.debug(&format!(
                "Uploaded {key}, ETag: {}",
                response.e_tag().unwrap_or("none")
            ));
            Ok::<(), DeployError>(())
        })
    }
}

/// Sort a create-bucket failure into the idempotent case and the fatal ones
pub(crate) fn classify_create_error(
    bucket: &str,
    err: CreateBucketError,
) -> Result<CreateBucketOutcome, DeployError> {
    match err {
        CreateBucketError::BucketAlreadyOwnedByYou(_) => Ok(CreateBucketOutcome::AlreadyOwnedByYou),
        CreateBucketError::BucketAlreadyExists(_) => {
            Err(DeployError::BucketOwnedByOther(bucket.to_string()))
        }
        other => Err(DeployError::CreateBucket(describe(&other))),
    }
}

/// Prefer the service's error code and message over the generic SDK display
fn describe<E>(err: &E) -> String
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(err).to_string(),
    }
}
