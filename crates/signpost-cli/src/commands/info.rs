//! Sign info command.

use anyhow::{Context, Result};
use clap::Args;

use signpost_core::SignService;

use crate::output;
use crate::service_select;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Sign service base URL, or local: for an in-process service
    #[arg(long)]
    pub service: String,

    /// Password guarding the in-process service (local: only)
    #[arg(long)]
    pub local_password: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: InfoArgs) -> Result<()> {
    let service = service_select::build_service(&args.service, args.local_password.as_deref())?;

    let signs = service
        .get_info()
        .await
        .context("Failed to query sign info")?;

    if args.json {
        output::json_pretty(&signs)?;
    } else if signs.is_empty() {
        println!("No signs connected");
    } else {
        for sign in &signs {
            output::field(&sign.name, &format!("{}x{}", sign.width, sign.height));
        }
    }

    Ok(())
}
