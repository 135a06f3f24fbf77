use jira_timelogs::commands::Cli;
use jira_timelogs::libs::messages::macros::is_debug_mode;
use jira_timelogs::msg_error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Values from .env never override variables already set in the shell
    dotenv::dotenv().ok();

    if is_debug_mode() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jira_timelogs=debug"));
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    match Cli::menu().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            msg_error!(err);
            ExitCode::FAILURE
        }
    }
}
