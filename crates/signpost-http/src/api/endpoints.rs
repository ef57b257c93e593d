//! API endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

use signpost_core::SignInfo;

// ============================================================================
// Endpoint Names
// ============================================================================

/// POST api/authenticate
pub const AUTHENTICATE: &str = "authenticate";

/// POST api/message
pub const SEND_MESSAGE: &str = "message";

/// GET api/info
pub const GET_INFO: &str = "info";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for authenticate.
#[derive(Serialize)]
pub struct AuthenticateRequest<'a> {
    pub password: &'a str,
}

/// Response from authenticate.
#[derive(Debug, Deserialize)]
pub struct AuthenticateResponse {
    pub token: String,
}

/// Request body for message submission.
#[derive(Debug, Serialize)]
pub struct MessageRequest<'a> {
    pub from: &'a str,
    pub text: &'a str,
}

/// Response from message submission.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {}

/// Response from the sign info query.
#[derive(Debug, Deserialize)]
pub struct GetInfoResponse {
    pub signs: Vec<SignInfo>,
}

/// Error body returned by the service on failure.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
