//! Command-line interface.
//!
//! ```ignore
//! use twigg::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command).await?;
//! ```

pub mod args;
pub mod generate;
pub mod publish;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, GenerateArgs, USAGE};
pub use generate::{handle_generate_command, write_summary, ProgressPrinter};
pub use publish::handle_publish_command;
pub use version::{version_string, VERSION};

use color_eyre::Result;

use crate::config::ClientConfig;

/// Run a parsed command. Configuration is read from the environment only
/// for commands that talk to the API.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}\n\n{}", version_string(), USAGE);
            Ok(())
        }
        CliCommand::Generate(args) => handle_generate_command(args, ClientConfig::from_env()?).await,
        CliCommand::Publish { draft_id } => {
            handle_publish_command(draft_id, ClientConfig::from_env()?).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_version_and_help_succeed_offline() {
        assert!(run_cli_command(CliCommand::Version).await.is_ok());
        assert!(run_cli_command(CliCommand::Help).await.is_ok());
    }
}
