//! Selection between the HTTP and in-process sign service backends.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use colored::Colorize;
use tokio::sync::mpsc;
use tracing::debug;

use signpost_core::{ServiceUrl, SignInfo, SignService, Token};
use signpost_http::HttpSignService;
use signpost_local::{LocalSignService, QueuedMessage};

/// The sign service backend selected from the CLI arguments.
pub enum CliSignService {
    Http(HttpSignService),
    Local(LocalSignService),
}

#[async_trait]
impl SignService for CliSignService {
    async fn authenticate(&self, password: &str) -> signpost_core::Result<Token> {
        match self {
            Self::Http(service) => service.authenticate(password).await,
            Self::Local(service) => service.authenticate(password).await,
        }
    }

    async fn send_message(
        &self,
        token: Option<&Token>,
        from: &str,
        text: &str,
    ) -> signpost_core::Result<()> {
        match self {
            Self::Http(service) => service.send_message(token, from, text).await,
            Self::Local(service) => service.send_message(token, from, text).await,
        }
    }

    async fn get_info(&self) -> signpost_core::Result<Vec<SignInfo>> {
        match self {
            Self::Http(service) => service.get_info().await,
            Self::Local(service) => service.get_info().await,
        }
    }
}

/// Build a backend from a service URL.
///
/// A `local:` URL spins up an in-process service guarded by
/// `local_password`, with queued messages echoed to the terminal in
/// place of sign hardware.
pub fn build_service(url: &str, local_password: Option<&str>) -> Result<CliSignService> {
    let service_url = ServiceUrl::new(url).context("Invalid service URL")?;

    if service_url.is_local() {
        let Some(password) = local_password else {
            bail!("--local-password is required with a local: service");
        };
        debug!("Using in-process sign service");
        let (tx, rx) = mpsc::channel(16);
        let service = LocalSignService::new(password, demo_signs(), tx)
            .context("Failed to create local sign service")?;
        spawn_sign_printer(rx);
        Ok(CliSignService::Local(service))
    } else {
        debug!(service = %service_url, "Using HTTP sign service");
        Ok(CliSignService::Http(HttpSignService::new(service_url)))
    }
}

/// Signs reported by the in-process service.
fn demo_signs() -> Vec<SignInfo> {
    vec![
        SignInfo {
            name: "top".to_string(),
            width: 84,
            height: 7,
        },
        SignInfo {
            name: "bottom".to_string(),
            width: 84,
            height: 7,
        },
    ]
}

/// Echo queued messages to the terminal, standing in for the sign.
fn spawn_sign_printer(mut rx: mpsc::Receiver<QueuedMessage>) {
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            println!(
                "{} {} {}",
                "[sign]".cyan(),
                format!("{}:", message.from).bold(),
                message.text
            );
        }
    });
}
