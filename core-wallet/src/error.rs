use bridge_traits::transport::{RemoteError, RemoteErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Capability;

/// EIP-1193 code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

/// A required piece of the integration is missing at the point it is needed.
///
/// These are programmer errors: they are raised synchronously and are not
/// meant to be retried without changing the setup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("If requesting a custom wallet, you must define the {0} handler")]
    HandlerMissing(Capability),

    #[error("If requesting a custom wallet, you must provide a custom wallet provider")]
    CustomWalletMissing,
}

/// Failure reported by a registered handler (declined prompt, signer offline).
///
/// Travels to the widget unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct HandlerError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn user_rejected() -> Self {
        Self::new("User rejected the request").with_code(USER_REJECTED_CODE)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_CODE)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<ConfigurationError> for RemoteError {
    fn from(err: ConfigurationError) -> Self {
        RemoteError::new(RemoteErrorKind::Configuration, err.to_string())
    }
}

impl From<HandlerError> for RemoteError {
    fn from(err: HandlerError) -> Self {
        RemoteError {
            kind: RemoteErrorKind::Handler,
            message: err.message,
            code: err.code,
        }
    }
}

pub type HandlerResult<T> = std::result::Result<T, HandlerError>;
