//! Provider-neutral error taxonomy shared by every Git provider client.

use std::fmt;

use thiserror::Error;

/// Convenient alias for provider-wide results.
pub type GitProviderResult<T> = Result<T, GitProviderError>;

/// Root error type returned by every provider client operation.
///
/// Providers classify their transport/API failures exactly once, at the call
/// site, into one of these variants. Callers match on the sentinel variants
/// (`NotFound`, `AlreadyExists`, ...) instead of inspecting HTTP details.
#[derive(Debug, Error)]
pub enum GitProviderError {
    /// The requested resource does not exist (HTTP 404).
    #[error("the requested resource was not found")]
    NotFound,

    /// The resource to create already exists (HTTP 409).
    #[error("the resource already exists")]
    AlreadyExists,

    /// A destructive call was attempted without explicit opt-in.
    #[error("cannot {action}: destructive calls are disallowed by this client")]
    DestructiveCallDisallowed {
        /// Human readable action that was blocked, e.g. "delete repository".
        action: &'static str,
    },

    /// The provider has no support for the requested operation.
    #[error("the provider does not support this operation")]
    NoProviderSupport,

    /// Invalid reference, request or API object.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The token was rejected (HTTP 401/403).
    #[error("invalid credentials: {message}")]
    InvalidCredentials { status: u16, message: String },

    /// Any other non-2xx HTTP status.
    #[error("http status error: status {status}: {message}")]
    Http { status: u16, message: String },

    /// Network/transport failure without an HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a body that could not be decoded.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Client options could not be assembled.
    #[error("invalid client options: {0}")]
    InvalidOptions(String),
}

impl GitProviderError {
    /// Returns true for [`GitProviderError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns true for [`GitProviderError::AlreadyExists`].
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists)
    }

    /// Returns true for [`GitProviderError::DestructiveCallDisallowed`].
    pub fn is_destructive_call_disallowed(&self) -> bool {
        matches!(self, Self::DestructiveCallDisallowed { .. })
    }
}

/// A collection of field-level problems found on one object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation error for {object}: {}", .problems.join("; "))]
pub struct ValidationError {
    /// Name of the validated object, e.g. `OrgRepositoryRef` or `gitea.Repository`.
    pub object: String,
    /// One message per offending field.
    pub problems: Vec<String>,
}

/// Accumulates validation problems for a single object.
///
/// ```
/// use gitprovider::Validator;
///
/// let mut v = Validator::new("UserRef");
/// v.required("user_login", "");
/// assert!(v.finish().is_err());
/// ```
#[derive(Debug)]
pub struct Validator {
    object: String,
    problems: Vec<String>,
}

impl Validator {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            problems: Vec::new(),
        }
    }

    /// Records a problem when `value` is empty or whitespace only.
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.problems.push(format!("field {field} is required"));
        }
        self
    }

    /// Records an arbitrary problem for `field`.
    pub fn invalid(&mut self, field: &str, reason: impl fmt::Display) -> &mut Self {
        self.problems.push(format!("field {field} is invalid: {reason}"));
        self
    }

    /// Turns the collected problems into a result.
    pub fn finish(self) -> GitProviderResult<()> {
        if self.problems.is_empty() {
            return Ok(());
        }
        Err(GitProviderError::Validation(ValidationError {
            object: self.object,
            problems: self.problems,
        }))
    }
}
