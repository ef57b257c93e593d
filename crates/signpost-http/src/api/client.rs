//! HTTP client for the sign service API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use signpost_core::error::{Error, ServiceError, TransportError};
use signpost_core::{ServiceUrl, Token};

use super::endpoints::ApiErrorResponse;

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// HTTP client for sign service requests.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    service: ServiceUrl,
}

impl HttpClient {
    /// Create a new client for the given service.
    pub fn new(service: ServiceUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("signpost/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, service }
    }

    /// Returns the service URL this client is configured for.
    #[allow(dead_code)]
    pub fn service(&self) -> &ServiceUrl {
        &self.service
    }

    /// Make an API procedure call (POST request).
    ///
    /// A bearer header is attached when a token is supplied.
    #[instrument(skip(self, body, token), fields(service = %self.service))]
    pub async fn procedure<B, R>(&self, method: &str, body: &B, token: Option<&Token>) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.service.endpoint_url(method);
        debug!(method, "API procedure");

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = token {
            request = request.headers(self.auth_headers(token));
        }
        let response = request.send().await.map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make an API query (GET request).
    #[instrument(skip(self), fields(service = %self.service))]
    pub async fn query<R>(&self, method: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.service.endpoint_url(method);
        debug!(method, "API query");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(&self, token: &Token) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token.as_str());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Handle an API response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(transport_error)?;
            Ok(body)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Service(error))
        }
    }

    /// Parse an API error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ServiceError {
        let status = response.status().as_u16();

        // Try to parse as the service's error format
        match response.json::<ApiErrorResponse>().await {
            Ok(error_body) => ServiceError::new(status, error_body.error, error_body.message),
            Err(_) => ServiceError::new(status, None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let service = ServiceUrl::new("https://sign.example.org").unwrap();
        let client = HttpClient::new(service.clone());
        assert_eq!(client.service().as_str(), service.as_str());
    }
}
