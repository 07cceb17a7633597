use anyhow::Result;
use serde::Serialize;

use crate::cmd::Context;
use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvOut {
    pub network: String,
    pub connection_endpoint: String,
    pub program_id: String,
}

pub async fn run(ctx: &Context) -> Result<()> {
    let env = super::resolve_env(ctx)?;

    output::print(&EnvOut {
        network: ctx.config.network.clone().unwrap_or_default(),
        connection_endpoint: env.connection_endpoint,
        program_id: ctx.program.program_id.to_string(),
    })?;
    Ok(())
}
