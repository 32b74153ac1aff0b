pub mod app;
pub mod args;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod ports;
pub mod utils {
    pub mod log_utils;
}

pub use app::{Deployer, run_app};
pub use args::Args;
pub use errors::DeployError;
