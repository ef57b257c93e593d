//! In-process sign service.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use signpost_core::error::{AuthError, Error, InvalidInputError, TransportError};
use signpost_core::{Result, SignInfo, SignService, Token};

/// Lifetime of issued tokens.
const TOKEN_TTL_SECS: i64 = 3600;

/// A message accepted by the service, awaiting display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedMessage {
    /// The sender named on the sign.
    pub from: String,
    /// The message text.
    pub text: String,
}

/// An in-process sign service.
///
/// Authenticates against a configured password (held only as a bcrypt
/// hash), issues random tokens with a bounded lifetime, and pushes
/// accepted messages onto a queue for whatever is standing in for the
/// sign hardware.
pub struct LocalSignService {
    password_hash: String,
    signs: Vec<SignInfo>,
    queue: mpsc::Sender<QueuedMessage>,
    token_ttl: Duration,
    issued: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl LocalSignService {
    /// Create a new service guarding the given password.
    ///
    /// Accepted messages are delivered on `queue`; `signs` describes the
    /// displays reported by [`get_info`](SignService::get_info).
    pub fn new(
        password: &str,
        signs: Vec<SignInfo>,
        queue: mpsc::Sender<QueuedMessage>,
    ) -> Result<Self> {
        let password_hash = hash(password, DEFAULT_COST).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;

        Ok(Self {
            password_hash,
            signs,
            queue,
            token_ttl: Duration::seconds(TOKEN_TTL_SECS),
            issued: Mutex::new(HashMap::new()),
        })
    }

    /// Override the token lifetime.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Check that a supplied token is one we issued and still current.
    ///
    /// Expired tokens are pruned as they are seen.
    fn validate_token(&self, token: Option<&Token>) -> Result<()> {
        let token = token.ok_or(AuthError::TokenMissing)?;
        let mut issued = self.issued.lock().unwrap();
        let expiry = *issued
            .get(token.as_str())
            .ok_or(AuthError::TokenInvalid)?;
        if expiry <= Utc::now() {
            issued.remove(token.as_str());
            return Err(AuthError::TokenExpired.into());
        }
        Ok(())
    }
}

#[async_trait]
impl SignService for LocalSignService {
    #[instrument(skip(self, password))]
    async fn authenticate(&self, password: &str) -> Result<Token> {
        debug!("Authenticating against local sign service");

        let ok = verify(password, &self.password_hash).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;
        if !ok {
            return Err(AuthError::IncorrectPassword.into());
        }

        let token = Uuid::new_v4().to_string();
        let expiry = Utc::now() + self.token_ttl;
        self.issued.lock().unwrap().insert(token.clone(), expiry);

        info!("Issued local session token");
        Ok(Token::new(token))
    }

    #[instrument(skip(self, token, text))]
    async fn send_message(&self, token: Option<&Token>, from: &str, text: &str) -> Result<()> {
        self.validate_token(token)?;

        debug!(from, "Queueing message");
        self.queue
            .send(QueuedMessage {
                from: from.to_string(),
                text: text.to_string(),
            })
            .await
            .map_err(|_| {
                Error::Transport(TransportError::Connection {
                    message: "message queue closed".to_string(),
                })
            })?;

        Ok(())
    }

    async fn get_info(&self) -> Result<Vec<SignInfo>> {
        Ok(self.signs.clone())
    }
}

impl fmt::Debug for LocalSignService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSignService")
            .field("signs", &self.signs)
            .field("token_ttl", &self.token_ttl)
            .field("password_hash", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signpost_core::ErrorKind;

    fn test_signs() -> Vec<SignInfo> {
        vec![SignInfo {
            name: "top".to_string(),
            width: 84,
            height: 7,
        }]
    }

    fn test_service() -> (LocalSignService, mpsc::Receiver<QueuedMessage>) {
        let (tx, rx) = mpsc::channel(4);
        let service = LocalSignService::new("secret123", test_signs(), tx).unwrap();
        (service, rx)
    }

    #[tokio::test]
    async fn correct_password_issues_token() {
        let (service, _rx) = test_service();

        let token = service.authenticate("secret123").await.unwrap();

        assert!(service.validate_token(Some(&token)).is_ok());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let (service, _rx) = test_service();

        let err = service.authenticate("wrong").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn send_requires_a_token() {
        let (service, _rx) = test_service();

        let err = service.send_message(None, "alice", "hi").await.unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::TokenMissing)));
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let (service, _rx) = test_service();
        let token = Token::new("not-issued");

        let err = service
            .send_message(Some(&token), "alice", "hi")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected_and_pruned() {
        let (service, _rx) = test_service();
        let service = service.with_token_ttl(Duration::zero());

        let token = service.authenticate("secret123").await.unwrap();

        let err = service
            .send_message(Some(&token), "alice", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::TokenExpired)));

        // Pruned on first sight; now unknown rather than expired
        let err = service
            .send_message(Some(&token), "alice", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::TokenInvalid)));
    }

    #[tokio::test]
    async fn accepted_message_reaches_the_queue() {
        let (service, mut rx) = test_service();

        let token = service.authenticate("secret123").await.unwrap();
        service
            .send_message(Some(&token), "alice", "hello sign")
            .await
            .unwrap();

        let queued = rx.recv().await.unwrap();
        assert_eq!(queued.from, "alice");
        assert_eq!(queued.text, "hello sign");
    }

    #[tokio::test]
    async fn closed_queue_reports_unavailable() {
        let (service, rx) = test_service();
        drop(rx);

        let token = service.authenticate("secret123").await.unwrap();
        let err = service
            .send_message(Some(&token), "alice", "hi")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn get_info_reports_configured_signs() {
        let (service, _rx) = test_service();

        let signs = service.get_info().await.unwrap();

        assert_eq!(signs, test_signs());
    }

    #[tokio::test]
    async fn debug_output_hides_password_hash() {
        let (service, _rx) = test_service();

        let debug = format!("{:?}", service);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("$2b$"));
    }
}
