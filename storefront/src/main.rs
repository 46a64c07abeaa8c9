use clap::Parser;
use storefront::cli::{Cli, run};
use storefront::setup_environment;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    // 1. dotenv + logging
    let config = setup_environment();

    // 2. parse and dispatch
    let cli = Cli::parse();
    match run(cli, &config).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {:#}", e);
            eprintln!("Something went wrong: {:#}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
