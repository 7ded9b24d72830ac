use anyhow::{Context, Result};
use clap::Args;
use sensev_api::Client;

use crate::output::print_json;

#[derive(Args)]
pub struct GetArgs {
    /// Endpoint path, e.g. /readings/
    pub endpoint: String,
}

pub fn run(args: &GetArgs, client: &Client) -> Result<()> {
    let resp = client
        .get(&args.endpoint)
        .with_context(|| format!("GET {} failed", args.endpoint))?;
    print_json(&resp);
    Ok(())
}
