use anyhow::{Context, Result};
use clap::Args;
use sensev_api::Client;
use serde_json::Value;

use crate::output::print_json;

#[derive(Args)]
pub struct PostArgs {
    /// Endpoint path, e.g. /readings/
    pub endpoint: String,

    /// JSON body to send
    #[arg(long)]
    pub data: String,
}

pub fn run(args: &PostArgs, client: &Client) -> Result<()> {
    let body = parse_body(&args.data)?;
    let resp = client
        .post(&args.endpoint, &body)
        .with_context(|| format!("POST {} failed", args.endpoint))?;
    print_json(&resp);
    Ok(())
}

fn parse_body(data: &str) -> Result<Value> {
    serde_json::from_str(data).context("--data is not valid JSON")
}
