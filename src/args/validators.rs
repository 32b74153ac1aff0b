use std::fs;
use std::path::PathBuf;

use super::types::Args;

/// Checks if a directory is readable
///
/// # Arguments
///
/// * `dir` - Path to check
///
/// # Returns
///
/// * `Result<PathBuf, String>` - The validated PathBuf or an error message
pub fn check_readable_dir(dir: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(dir);

    if path.is_dir() && fs::metadata(&path).is_ok() && fs::read_dir(&path).is_ok() {
        Ok(path)
    } else {
        Err(format!("The directory '{}' is not readable.", dir))
    }
}

/// Rejects only an empty bucket name; naming rules are left to S3
pub fn check_bucket_name(bucket: &str) -> Result<String, String> {
    if bucket.is_empty() {
        Err("The bucket name must not be empty.".to_string())
    } else {
        Ok(bucket.to_string())
    }
}

/// Region codes end up in endpoint host names, so they must be lowercase
/// letters, digits and dashes.
pub fn check_region(region: &str) -> Result<(), String> {
    let valid = !region.is_empty()
        && !region.starts_with('-')
        && !region.ends_with('-')
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(format!("'{region}' is not a valid AWS region code."))
    }
}

pub(crate) fn validate(args: &Args) -> Result<(), String> {
    check_bucket_name(&args.bucket)?;
    check_region(&args.region)
}
