use clap::Subcommand;
use serde_json::json;

use crate::auth::generate_secret;
use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum SecretCommands {
    #[command(about = "Generate a new API token and store it")]
    Generate {
        #[arg(long, help = "Secret identifier (defaults to SECRET_ARN)")]
        secret_id: Option<String>,
        #[arg(long, help = "Print the generated token")]
        print: bool,
    },
}

pub async fn handle(cmd: SecretCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        SecretCommands::Generate { secret_id, print } => {
            let store = crate::cli::secret_store(config);
            let secret_id = secret_id.unwrap_or_else(|| config.secrets.secret_id.clone());
            let token = generate_secret();
            store.put_secret_value(&secret_id, &token).await?;
            tracing::info!("Rotated secret {}", secret_id);

            let mut data = json!({
                "secret_id": secret_id,
                "store": store.path().display().to_string(),
            });
            if print {
                data["token"] = json!(token);
            }
            utils::output_success(&output_format, "Generated new API token", Some(data))
        }
    }
}
