mod common;

use s3_site_deploy::utils::log_utils::Logger;
use s3_site_deploy::{DeployError, Deployer};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<(String, String, PathBuf)>>>;

#[test]
fn test_uploads_use_manifest_keys_and_content_types() -> Result<(), Box<dyn std::error::Error>> {
    let site = common::site_dir(&[])?;
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);

    let mut storage = common::authenticated_storage();
    storage
        .expect_put_object()
        .times(3)
        .returning(move |bucket, key, path, content_type| {
            assert_eq!(bucket, "test-app");
            recorded.lock().unwrap().push((
                key.to_string(),
                content_type.to_string(),
                path.to_path_buf(),
            ));
            Ok(())
        });

    let deployer = Deployer::connect(Box::new(storage), "us-east-1", &Logger::new(0))?
        .with_source_dir(site.path());
    let summary = deployer.upload_files("test-app");

    assert!(summary.all_uploaded());
    let calls = calls.lock().unwrap();
    let keys: Vec<_> = calls.iter().map(|(k, c, _)| (k.as_str(), c.as_str())).collect();
    assert_eq!(
        keys,
        [
            ("index.html", "text/html"),
            ("styles.css", "text/css"),
            ("script.js", "application/javascript"),
        ]
    );
    assert_eq!(calls[0].2, site.path().join("index.html"));
    Ok(())
}

#[test]
fn test_missing_file_fails_deploy_but_others_upload() -> Result<(), Box<dyn std::error::Error>> {
    for missing in ["index.html", "styles.css", "script.js"] {
        let site = common::site_dir(&[missing])?;
        let mut storage = common::authenticated_storage();
        storage.expect_put_bucket_website().returning(|_, _| Ok(()));
        storage.expect_put_bucket_policy().returning(|_, _| Ok(()));
        storage
            .expect_put_object()
            .withf(move |_, key, _, _| key != missing)
            .times(2)
            .returning(|_, _, _, _| Ok(()));

        let deployer = Deployer::connect(Box::new(storage), "us-east-1", &Logger::new(0))?
            .with_source_dir(site.path());

        match deployer.deploy("test-app", false) {
            Err(DeployError::IncompleteUpload { uploaded, expected }) => {
                assert_eq!(uploaded, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("expected incomplete upload, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn test_remote_upload_failure_is_recorded() -> Result<(), Box<dyn std::error::Error>> {
    let site = common::site_dir(&[])?;
    let mut storage = common::authenticated_storage();
    storage
        .expect_put_object()
        .times(3)
        .returning(|_, key, _, _| {
            if key == "styles.css" {
                Err(DeployError::Upload("styles.css: SlowDown".to_string()))
            } else {
                Ok(())
            }
        });

    let deployer = Deployer::connect(Box::new(storage), "us-east-1", &Logger::new(0))?
        .with_source_dir(site.path());
    let summary = deployer.upload_files("test-app");

    assert!(!summary.all_uploaded());
    assert_eq!(summary.uploaded, ["index.html", "script.js"]);
    assert!(summary.missing.is_empty());
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "styles.css");
    assert!(summary.failed[0].1.contains("SlowDown"));
    Ok(())
}

#[test]
fn test_empty_source_dir_uploads_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let site = tempfile::tempdir()?;
    let mut storage = common::authenticated_storage();
    storage.expect_put_object().never();

    let deployer = Deployer::connect(Box::new(storage), "us-east-1", &Logger::new(0))?
        .with_source_dir(site.path());
    let summary = deployer.upload_files("test-app");

    assert!(summary.uploaded.is_empty());
    assert_eq!(summary.missing, ["index.html", "styles.css", "script.js"]);
    Ok(())
}
