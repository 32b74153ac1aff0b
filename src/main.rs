use s3_site_deploy::app::credentials_help;
use s3_site_deploy::{args, run_app};

fn main() {
    // Parse and validate command-line arguments
    let args = args::args_checks();

    if let Err(e) = run_app(&args) {
        eprintln!("Deployment error: {e}");
        if e.is_credentials() {
            eprintln!("\n{}", credentials_help());
        }
        std::process::exit(1);
    }
}
