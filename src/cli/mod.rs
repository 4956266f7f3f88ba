pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::auth::{Authorizer, FileSecretStore};
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "alumnus")]
#[command(about = "Alumnus CLI - invoke the authorizer and record handler locally")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output compact JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Evaluate the token authorizer and print its policy")]
    Authorize(commands::authorize::AuthorizeArgs),

    #[command(about = "Run the record handler on a proxy event")]
    Invoke(commands::invoke::InvokeArgs),

    #[command(about = "API token management")]
    Secret {
        #[command(subcommand)]
        cmd: commands::secret::SecretCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Pretty
        }
    }
}

/// File-backed store and authorizer as configured by the environment
pub fn secret_store(config: &AppConfig) -> FileSecretStore {
    FileSecretStore::new(config.secrets.secrets_file.clone())
}

pub fn authorizer(config: &AppConfig) -> Authorizer {
    Authorizer::new(Arc::new(secret_store(config)), config.secrets.secret_id.clone())
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::config();

    match cli.command {
        Commands::Authorize(args) => commands::authorize::handle(args, config, output_format).await,
        Commands::Invoke(args) => commands::invoke::handle(args, output_format).await,
        Commands::Secret { cmd } => commands::secret::handle(cmd, config, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_authorize_with_token() {
        let cli = Cli::try_parse_from([
            "alumnus",
            "--json",
            "authorize",
            "--token",
            "abc",
            "--method-arn",
            "arn:aws:execute-api:us-east-1:000000000000:x/dev/GET/alumnus",
        ])
        .unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Authorize(_)));
    }

    #[test]
    fn authorize_event_conflicts_with_token() {
        let result = Cli::try_parse_from([
            "alumnus", "authorize", "--event", "event.json", "--token", "abc", "--method-arn", "arn",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_secret_generate() {
        let cli = Cli::try_parse_from(["alumnus", "secret", "generate", "--secret-id", "x", "--print"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Pretty);
        assert!(matches!(cli.command, Commands::Secret { .. }));
    }
}
