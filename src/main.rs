use std::process::ExitCode;

use clap::Parser;

use daily_memo_lib::state::load_config;
use daily_memo_lib::types::WorkflowId;

/// Create today's team memo in Notion, or email it to the team.
#[derive(Debug, Parser)]
#[command(name = "daily-memo", version)]
struct Cli {
    /// Workflow to run
    #[arg(value_enum)]
    workflow: WorkflowId,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Usage errors exit here, before config is read or anything is contacted.
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config(cli.workflow) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if !daily_memo_lib::run_workflow(cli.workflow, &config).await {
        log::warn!("'{}' workflow did not complete; see errors above", cli.workflow);
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn clap_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_both_workflows() {
        let cli = Cli::try_parse_from(["daily-memo", "create"]).unwrap();
        assert_eq!(cli.workflow, WorkflowId::Create);
        let cli = Cli::try_parse_from(["daily-memo", "send"]).unwrap();
        assert_eq!(cli.workflow, WorkflowId::Send);
    }

    #[test]
    fn unknown_workflow_is_usage_error() {
        let err = Cli::try_parse_from(["daily-memo", "delete"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn missing_workflow_is_usage_error() {
        let err = Cli::try_parse_from(["daily-memo"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);
    }
}
