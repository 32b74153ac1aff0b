#![allow(dead_code)]

use s3_site_deploy::domain::{CallerIdentity, FILE_MANIFEST};
use s3_site_deploy::ports::MockStoragePort;
use std::fs;
use tempfile::TempDir;

pub const ACCOUNT_ID: &str = "123456789012";

/// Temp dir holding every manifest file except those listed in `skip`
pub fn site_dir(skip: &[&str]) -> Result<TempDir, Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    for entry in &FILE_MANIFEST {
        if skip.contains(&entry.file_name) {
            continue;
        }
        fs::write(
            dir.path().join(entry.file_name),
            format!("/* {} */", entry.file_name),
        )?;
    }
    Ok(dir)
}

/// Mock that already answers the identity check
pub fn authenticated_storage() -> MockStoragePort {
    let mut storage = MockStoragePort::new();
    storage.expect_caller_identity().times(1).returning(|| {
        Ok(CallerIdentity {
            account_id: ACCOUNT_ID.to_string(),
            display_name: Some("deployer".to_string()),
        })
    });
    storage
}
