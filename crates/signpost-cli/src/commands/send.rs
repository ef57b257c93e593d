//! One-shot send command.

use anyhow::{Context, Result, bail};
use clap::Args;

use signpost_core::SessionClient;

use crate::output;
use crate::service_select;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Sign service base URL, or local: for an in-process service
    #[arg(long)]
    pub service: String,

    /// Password guarding the in-process service (local: only)
    #[arg(long)]
    pub local_password: Option<String>,

    /// Sender name shown alongside the message
    #[arg(long)]
    pub from: String,

    /// Message text to display
    pub text: String,

    /// Service password; falls back to SIGNPOST_PASSWORD, then a prompt
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn run(args: SendArgs) -> Result<()> {
    let service = service_select::build_service(&args.service, args.local_password.as_deref())?;

    let password = match args.password {
        Some(password) => password,
        None => match std::env::var("SIGNPOST_PASSWORD") {
            Ok(password) => password,
            Err(_) => {
                rpassword::prompt_password("Password: ").context("Failed to read password")?
            }
        },
    };

    let mut client = SessionClient::new(service);

    client.authenticate(&password).await;
    if let Some(err) = client.error() {
        bail!("Authentication failed: {}", err);
    }

    client.send_message(&args.from, &args.text).await;
    match client.error() {
        None => {
            output::success("Message sent");
            Ok(())
        }
        Some(err) => bail!("Message not delivered: {}", err),
    }
}
