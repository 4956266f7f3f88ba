use clap::Args;
use std::path::PathBuf;

use crate::api::{ProxyRequest, ProxyResponse};
use crate::cli::{utils, OutputFormat};
use crate::handlers;
use crate::types::LookupRequest;

#[derive(Args, Debug)]
pub struct InvokeArgs {
    #[arg(long, help = "Proxy event JSON file (`-` for stdin)")]
    pub event: PathBuf,
}

pub fn invoke(args: &InvokeArgs) -> anyhow::Result<ProxyResponse> {
    let event: ProxyRequest = utils::read_event(&args.event)?;
    Ok(handlers::handle(&LookupRequest::from(event)))
}

pub async fn handle(args: InvokeArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let response = invoke(&args)?;
    utils::output_value(&output_format, &response)
}
