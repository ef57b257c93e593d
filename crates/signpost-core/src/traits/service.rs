//! Sign service trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, Token};

/// Information about one connected sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInfo {
    /// The sign's name.
    pub name: String,
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
}

/// A sign service implementation.
///
/// Each method resolves exactly once, to a response or an error; the error
/// carries a classification distinguishing at least authentication
/// failures from other failure classes. The [`SessionClient`] depends only
/// on this shape, not on any specific transport mechanism.
///
/// [`SessionClient`]: crate::SessionClient
#[async_trait]
pub trait SignService: Send + Sync {
    /// Exchange a password for a bearer token.
    async fn authenticate(&self, password: &str) -> Result<Token>;

    /// Submit a text message for display.
    ///
    /// The token is attached when present; calls without one are still
    /// issued and rejected by the service.
    async fn send_message(&self, token: Option<&Token>, from: &str, text: &str) -> Result<()>;

    /// Query information about the connected signs.
    ///
    /// This is a read-only query and does not require authentication.
    async fn get_info(&self) -> Result<Vec<SignInfo>>;
}
