use serde::Serialize;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const INDEX_DOCUMENT: &str = "index.html";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_name: &'static str,
    pub content_type: &'static str,
}

/// Files uploaded on every deployment, in upload order. Object keys equal file names.
pub const FILE_MANIFEST: [ManifestEntry; 3] = [
    ManifestEntry {
        file_name: INDEX_DOCUMENT,
        content_type: "text/html",
    },
    ManifestEntry {
        file_name: "styles.css",
        content_type: "text/css",
    },
    ManifestEntry {
        file_name: "script.js",
        content_type: "application/javascript",
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub bucket: String,
    pub region: String,
}

impl DeploymentTarget {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
        }
    }

    #[must_use]
    pub fn is_default_region(&self) -> bool {
        self.region == DEFAULT_REGION
    }

    /// Public website endpoint for the bucket.
    ///
    /// The default region keeps its legacy dash-style endpoint; every other region
    /// uses the dot-style endpoint, which all regions accept.
    #[must_use]
    pub fn website_url(&self) -> String {
        if self.is_default_region() {
            format!("http://{}.s3-website-{DEFAULT_REGION}.amazonaws.com", self.bucket)
        } else {
            format!("http://{}.s3-website.{}.amazonaws.com", self.bucket, self.region)
        }
    }

    #[must_use]
    pub fn console_url(&self) -> String {
        console_url(&self.bucket)
    }
}

#[must_use]
pub fn website_url(bucket: &str, region: &str) -> String {
    DeploymentTarget::new(bucket, region).website_url()
}

#[must_use]
pub fn console_url(bucket: &str) -> String {
    format!("https://console.aws.amazon.com/s3/buckets/{bucket}")
}

/// Website hosting settings applied to the bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WebsiteConfig {
    pub index_document: &'static str,
    pub error_document: &'static str,
}

impl WebsiteConfig {
    /// Serve `index.html` and send every error back to it
    #[must_use]
    pub fn single_page_app() -> Self {
        Self {
            index_document: INDEX_DOCUMENT,
            error_document: INDEX_DOCUMENT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: &'static str,
    pub statement: Vec<PolicyStatement>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub sid: &'static str,
    pub effect: &'static str,
    pub principal: &'static str,
    pub action: &'static str,
    pub resource: String,
}

impl PolicyDocument {
    /// Anonymous `s3:GetObject` on every object in the bucket
    #[must_use]
    pub fn public_read(bucket: &str) -> Self {
        Self {
            version: "2012-10-17",
            statement: vec![PolicyStatement {
                sid: "PublicRead",
                effect: "Allow",
                principal: "*",
                action: "s3:GetObject",
                resource: format!("arn:aws:s3:::{bucket}/*"),
            }],
        }
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateBucketOutcome {
    Created,
    AlreadyOwnedByYou,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account_id: String,
    pub display_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UploadSummary {
    pub uploaded: Vec<&'static str>,
    pub missing: Vec<&'static str>,
    pub failed: Vec<(&'static str, String)>,
}

impl UploadSummary {
    #[must_use]
    pub fn all_uploaded(&self) -> bool {
        self.uploaded.len() == FILE_MANIFEST.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentReport {
    pub target: DeploymentTarget,
    pub bucket_created: Option<CreateBucketOutcome>,
    pub uploads: UploadSummary,
    pub warnings: Vec<String>,
    pub website_url: String,
    pub console_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_url_shape() {
        assert_eq!(
            website_url("test-app", "us-east-1"),
            "http://test-app.s3-website-us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn other_region_url_shape_differs() {
        let url = website_url("test-app", "eu-west-2");
        assert_eq!(url, "http://test-app.s3-website.eu-west-2.amazonaws.com");
        assert!(!url.contains("s3-website-"));
    }

    #[test]
    fn urls_embed_bucket_verbatim() {
        for region in ["us-east-1", "us-west-2", "ap-southeast-1"] {
            let target = DeploymentTarget::new("My.Odd-Bucket_42", region);
            assert!(target.website_url().starts_with("http://My.Odd-Bucket_42."));
        }
        assert_eq!(
            console_url("my-bucket"),
            "https://console.aws.amazon.com/s3/buckets/my-bucket"
        );
    }

    #[test]
    fn default_region_detection() {
        assert!(DeploymentTarget::new("b", "us-east-1").is_default_region());
        assert!(!DeploymentTarget::new("b", "us-east-2").is_default_region());
    }

    #[test]
    fn manifest_entries() {
        let names: Vec<_> = FILE_MANIFEST.iter().map(|e| e.file_name).collect();
        assert_eq!(names, ["index.html", "styles.css", "script.js"]);
        let types: Vec<_> = FILE_MANIFEST.iter().map(|e| e.content_type).collect();
        assert_eq!(types, ["text/html", "text/css", "application/javascript"]);
    }

    #[test]
    fn public_read_policy_json() {
        let json = PolicyDocument::public_read("test-app").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Version"], "2012-10-17");
        let statement = &value["Statement"][0];
        assert_eq!(statement["Sid"], "PublicRead");
        assert_eq!(statement["Effect"], "Allow");
        assert_eq!(statement["Principal"], "*");
        assert_eq!(statement["Action"], "s3:GetObject");
        assert_eq!(statement["Resource"], "arn:aws:s3:::test-app/*");
    }

    #[test]
    fn spa_website_config_falls_back_to_index() {
        let config = WebsiteConfig::single_page_app();
        assert_eq!(config.index_document, "index.html");
        assert_eq!(config.error_document, config.index_document);
    }

    #[test]
    fn upload_summary_requires_every_entry() {
        let mut summary = UploadSummary {
            uploaded: vec!["index.html", "styles.css"],
            missing: vec!["script.js"],
            failed: Vec::new(),
        };
        assert!(!summary.all_uploaded());
        summary.uploaded.push("script.js");
        summary.missing.clear();
        assert!(summary.all_uploaded());
    }
}
