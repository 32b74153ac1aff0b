use clap::Parser;
use std::path::PathBuf;

use super::validators::{check_bucket_name, check_readable_dir, validate};
use crate::domain::DEFAULT_REGION;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Deploy a static web app to an S3 website bucket",
    long_about = None,
    after_help = "Examples:\n  s3-site-deploy --bucket my-todo-app-2026 --create\n  s3-site-deploy --bucket my-todo-app-2026 --region us-west-2 --create"
)]
pub struct Args {
    /// S3 bucket name (must be globally unique)
    #[arg(long, value_name = "NAME", value_parser = check_bucket_name)]
    pub bucket: String,

    /// Create the bucket before configuring it
    #[arg(long)]
    pub create: bool,

    /// AWS region
    #[arg(long, value_name = "CODE", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Directory holding index.html, styles.css and script.js
    #[arg(
        short = 'p',
        long,
        value_name = "PATH",
        default_value = ".",
        value_parser = check_readable_dir
    )]
    pub path: PathBuf,

    /// Fail the deployment if static hosting or the public policy cannot be set
    #[arg(long)]
    pub strict: bool,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            create: false,
            region: DEFAULT_REGION.to_string(),
            path: PathBuf::from("."),
            strict: false,
            verbose: 0,
        }
    }
}

impl Args {
    /// Validate the arguments as a whole, without modifying them
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket or region are unusable.
    pub fn validate(&self) -> Result<(), String> {
        validate(self)
    }
}
