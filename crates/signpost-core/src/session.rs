//! Authenticated session client.

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::error::{Error, ErrorKind};
use crate::token::Token;
use crate::traits::SignService;
use crate::Result;

/// Client for the two authenticated sign service operations.
///
/// The client owns at most one bearer [`Token`] and the most recent call
/// failure. Every completed call funnels through the same handling: a
/// success clears the last error, a failure records it, and a failure
/// classified as unauthenticated additionally revokes the token. Callers
/// observe outcomes through [`error`](Self::error) and
/// [`is_authenticated`](Self::is_authenticated) rather than a return
/// channel, so post-call handling for both operations reads one
/// inspectable property.
///
/// The client is intended for single-threaded, event-driven use: one
/// outstanding call at a time, driven by discrete user actions.
pub struct SessionClient<S> {
    service: S,
    token: Option<Token>,
    last_error: Option<Error>,
}

impl<S: SignService> SessionClient<S> {
    /// Create a client for the given sign service.
    pub fn new(service: S) -> Self {
        Self {
            service,
            token: None,
            last_error: None,
        }
    }

    /// Exchange a password for a bearer token.
    ///
    /// On success the token is stored and the last error cleared; on
    /// failure the error is recorded and no token is stored.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&mut self, password: &str) {
        debug!("Authenticating with sign service");
        let result = self.service.authenticate(password).await;
        if let Some(token) = self.complete(result) {
            self.token = Some(token);
        }
    }

    /// Submit a text message for display.
    ///
    /// The held token is attached when present. Without one the call is
    /// still attempted and the service's rejection lands in
    /// [`error`](Self::error) like any other failure.
    #[instrument(skip(self, text))]
    pub async fn send_message(&mut self, from: &str, text: &str) {
        debug!(from, "Sending message");
        let result = self.service.send_message(self.token.as_ref(), from, text).await;
        self.complete(result);
    }

    /// Shared completion handling for both operations.
    ///
    /// An unauthenticated classification is the only path that revokes
    /// the token; other failures leave it intact.
    fn complete<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(err) => {
                if err.kind() == ErrorKind::Unauthenticated {
                    warn!("Credential rejected; clearing token");
                    self.token = None;
                }
                self.last_error = Some(err);
                None
            }
        }
    }

    /// The most recent call's failure, if the call failed.
    pub fn error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Whether a bearer token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Access the underlying sign service.
    pub fn service(&self) -> &S {
        &self.service
    }
}

impl<S> fmt::Debug for SessionClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("token", &self.token)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{AuthError, ServiceError, TransportError};
    use crate::traits::SignInfo;

    /// Stub service replaying scripted outcomes.
    struct StubService {
        auth: Mutex<VecDeque<Result<Token>>>,
        send: Mutex<VecDeque<Result<()>>>,
    }

    impl StubService {
        fn new() -> Self {
            Self {
                auth: Mutex::new(VecDeque::new()),
                send: Mutex::new(VecDeque::new()),
            }
        }

        fn on_authenticate(self, result: Result<Token>) -> Self {
            self.auth.lock().unwrap().push_back(result);
            self
        }

        fn on_send(self, result: Result<()>) -> Self {
            self.send.lock().unwrap().push_back(result);
            self
        }
    }

    #[async_trait]
    impl SignService for StubService {
        async fn authenticate(&self, _password: &str) -> Result<Token> {
            self.auth
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected authenticate call")
        }

        async fn send_message(
            &self,
            _token: Option<&Token>,
            _from: &str,
            _text: &str,
        ) -> Result<()> {
            self.send
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected send_message call")
        }

        async fn get_info(&self) -> Result<Vec<SignInfo>> {
            Ok(Vec::new())
        }
    }

    fn unauthenticated() -> Error {
        Error::Service(ServiceError::new(
            401,
            Some("ExpiredToken".into()),
            Some("Token has expired".into()),
        ))
    }

    fn unavailable() -> Error {
        Error::Transport(TransportError::Connection {
            message: "connection refused".into(),
        })
    }

    async fn authenticated_client(service: StubService) -> SessionClient<StubService> {
        let service = service.on_authenticate(Ok(Token::new("issued-token")));
        let mut client = SessionClient::new(service);
        client.authenticate("pw").await;
        assert!(client.is_authenticated());
        client
    }

    #[tokio::test]
    async fn successful_authenticate_stores_token_and_clears_error() {
        let service = StubService::new().on_authenticate(Ok(Token::new("issued-token")));
        let mut client = SessionClient::new(service);

        client.authenticate("pw").await;

        assert!(client.is_authenticated());
        assert!(client.error().is_none());
    }

    #[tokio::test]
    async fn failed_authenticate_records_error_without_token() {
        let service =
            StubService::new().on_authenticate(Err(Error::Auth(AuthError::IncorrectPassword)));
        let mut client = SessionClient::new(service);

        client.authenticate("wrong").await;

        assert!(!client.is_authenticated());
        let err = client.error().expect("error should be recorded");
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn successful_send_clears_error_and_keeps_token() {
        let service = StubService::new().on_send(Ok(()));
        let mut client = authenticated_client(service).await;

        client.send_message("alice", "hi").await;

        assert!(client.error().is_none());
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn unauthenticated_send_failure_revokes_token() {
        let service = StubService::new().on_send(Err(unauthenticated()));
        let mut client = authenticated_client(service).await;

        client.send_message("alice", "hi").await;

        assert!(!client.is_authenticated());
        assert_eq!(
            client.error().map(Error::kind),
            Some(ErrorKind::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn unavailable_send_failure_keeps_token() {
        let service = StubService::new().on_send(Err(unavailable()));
        let mut client = authenticated_client(service).await;

        client.send_message("alice", "hi").await;

        assert!(client.is_authenticated());
        assert_eq!(
            client.error().map(Error::kind),
            Some(ErrorKind::Unavailable)
        );
    }

    #[tokio::test]
    async fn success_after_failure_clears_last_error() {
        let service = StubService::new()
            .on_send(Err(unavailable()))
            .on_send(Ok(()));
        let mut client = authenticated_client(service).await;

        client.send_message("alice", "first").await;
        assert!(client.error().is_some());

        client.send_message("alice", "second").await;
        assert!(client.error().is_none());
    }

    #[tokio::test]
    async fn send_without_token_still_attempts_call() {
        let service = StubService::new().on_send(Err(Error::Auth(AuthError::TokenMissing)));
        let mut client = SessionClient::new(service);

        client.send_message("alice", "hi").await;

        assert!(!client.is_authenticated());
        assert_eq!(
            client.error().map(Error::kind),
            Some(ErrorKind::Unauthenticated)
        );
    }

    #[tokio::test]
    async fn token_hidden_in_debug_output() {
        let service = StubService::new().on_authenticate(Ok(Token::new("super-secret")));
        let mut client = SessionClient::new(service);
        client.authenticate("pw").await;

        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
    }
}
