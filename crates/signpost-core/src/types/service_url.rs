//! Sign service URL type.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated sign service URL.
///
/// This type supports both network service URLs (HTTPS/HTTP) and the
/// `local:` scheme used to select an in-process service.
///
/// # Network URLs
///
/// Network URLs must use HTTPS (or HTTP for localhost) and are used to
/// connect to a remote sign service.
///
/// # Local URLs
///
/// The `local:` scheme enables development and testing without running a
/// network service; messages are handled in-process.
///
/// # Example
///
/// ```
/// use signpost_core::ServiceUrl;
///
/// // Network service
/// let service = ServiceUrl::new("https://sign.example.org").unwrap();
/// assert_eq!(service.endpoint_url("authenticate"),
///            "https://sign.example.org/api/authenticate");
///
/// // In-process service
/// let local = ServiceUrl::new("local:").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Create a new service URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ServiceUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    fn validate(url: &Url, raw: &str) -> Result<(), Error> {
        match url.scheme() {
            "https" | "local" => Ok(()),
            "http" => {
                let localhost = matches!(url.host_str(), Some("localhost") | Some("127.0.0.1"));
                if localhost {
                    Ok(())
                } else {
                    Err(InvalidInputError::ServiceUrl {
                        value: raw.to_string(),
                        reason: "http is only allowed for localhost".to_string(),
                    }
                    .into())
                }
            }
            other => Err(InvalidInputError::ServiceUrl {
                value: raw.to_string(),
                reason: format!("unsupported scheme '{}'", other),
            }
            .into()),
        }
    }

    /// Returns the API endpoint URL for a given method.
    pub fn endpoint_url(&self, method: &str) -> String {
        // The URL crate always adds a trailing slash to root paths,
        // so we need to handle that when constructing the endpoint URL
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/api/{}", base, method)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true if this URL selects the in-process service.
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "local"
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
