//! HTTP-backed sign service.

use async_trait::async_trait;
use tracing::{debug, instrument};

use signpost_core::{Result, ServiceUrl, SignInfo, SignService, Token};

use crate::api::client::HttpClient;
use crate::api::endpoints::*;

/// A network-backed sign service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSignService {
    service: ServiceUrl,
    client: HttpClient,
}

impl HttpSignService {
    /// Create a new HTTP sign service for the given URL.
    pub fn new(service: ServiceUrl) -> Self {
        let client = HttpClient::new(service.clone());
        Self { service, client }
    }

    /// Returns the service URL for this instance.
    pub fn url(&self) -> &ServiceUrl {
        &self.service
    }
}

#[async_trait]
impl SignService for HttpSignService {
    #[instrument(skip(self, password))]
    async fn authenticate(&self, password: &str) -> Result<Token> {
        debug!("Authenticating via HTTP");

        let request = AuthenticateRequest { password };
        let response: AuthenticateResponse =
            self.client.procedure(AUTHENTICATE, &request, None).await?;

        Ok(Token::new(response.token))
    }

    #[instrument(skip(self, token, text))]
    async fn send_message(&self, token: Option<&Token>, from: &str, text: &str) -> Result<()> {
        debug!(from, "Sending message via HTTP");

        let request = MessageRequest { from, text };
        let _: MessageResponse = self
            .client
            .procedure(SEND_MESSAGE, &request, token)
            .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_info(&self) -> Result<Vec<SignInfo>> {
        debug!("Querying sign info via HTTP");

        let response: GetInfoResponse = self.client.query(GET_INFO).await?;

        Ok(response.signs)
    }
}
