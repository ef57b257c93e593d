//! Interactive session command.
//!
//! This is the presentation layer over the core: it renders the current
//! flow phase, collects input, invokes the session client, and chooses
//! which flow event to emit from the client's error state.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use signpost_core::{Error, ErrorKind, Flow, FlowEvent, FlowState, SessionClient};

use crate::output;
use crate::service_select;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Sign service base URL, or local: for an in-process service
    #[arg(long)]
    pub service: String,

    /// Password guarding the in-process service (local: only)
    #[arg(long)]
    pub local_password: Option<String>,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let service = service_select::build_service(&args.service, args.local_password.as_deref())?;
    let mut client = SessionClient::new(service);
    let mut flow = Flow::new();

    loop {
        match flow.state() {
            FlowState::Login => {
                let password =
                    rpassword::prompt_password("Password: ").context("Failed to read password")?;
                client.authenticate(&password).await;
                match client.error() {
                    None => {
                        output::success("Authenticated");
                        flow.send(FlowEvent::Auth);
                    }
                    Some(err) => output::error(&format!("Authentication failed: {}", err)),
                }
            }
            FlowState::Message => {
                let from = prompt("From")?;
                let text = prompt("Message")?;
                client.send_message(&from, &text).await;

                let event = event_after_send(client.error());
                if event == FlowEvent::Reauth {
                    output::warning("Session expired; please log in again");
                }
                flow.send(event);
            }
            FlowState::Result => {
                match client.error() {
                    None => output::success("Message sent"),
                    Some(err) => output::error(&format!("Message not delivered: {}", err)),
                }
                if !confirm("Send another?")? {
                    break;
                }
                flow.send(FlowEvent::New);
            }
        }
    }

    Ok(())
}

/// Choose the flow event to emit after a send attempt.
///
/// An unauthenticated failure routes back to login; every other outcome,
/// including a service failure, proceeds to the result phase, which is
/// responsible for surfacing the error.
fn event_after_send(error: Option<&Error>) -> FlowEvent {
    match error {
        Some(err) if err.kind() == ErrorKind::Unauthenticated => FlowEvent::Reauth,
        _ => FlowEvent::Sent,
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

fn confirm(label: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N]", label))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}
