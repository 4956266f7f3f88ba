use clap::Args;
use std::path::PathBuf;

use crate::api::{AuthorizerEvent, AuthorizerResponse};
use crate::auth::Authorizer;
use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct AuthorizeArgs {
    #[arg(long, help = "Authorizer event JSON file (`-` for stdin)", conflicts_with_all = ["token", "method_arn"])]
    pub event: Option<PathBuf>,

    #[arg(long, help = "Client token", requires = "method_arn")]
    pub token: Option<String>,

    #[arg(long, help = "Method ARN being invoked", requires = "token")]
    pub method_arn: Option<String>,
}

impl AuthorizeArgs {
    fn event(&self) -> anyhow::Result<AuthorizerEvent> {
        match (&self.event, &self.token, &self.method_arn) {
            (Some(path), _, _) => utils::read_event(path),
            (None, Some(token), Some(arn)) => Ok(AuthorizerEvent::token(arn.clone(), token.clone())),
            _ => anyhow::bail!("provide --event, or both --token and --method-arn"),
        }
    }
}

pub async fn evaluate(args: &AuthorizeArgs, authorizer: &Authorizer) -> anyhow::Result<AuthorizerResponse> {
    let event = args.event()?;
    Ok(authorizer.handle_event(&event).await?)
}

pub async fn handle(args: AuthorizeArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let authorizer = crate::cli::authorizer(config);
    let response = evaluate(&args, &authorizer).await?;
    utils::output_value(&output_format, &response)
}
