use bridge_traits::error::BridgeError;
use core_wallet::ConfigurationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid widget locator: {0}")]
    InvalidLocator(String),

    #[error("Unknown wallet kind: {0}")]
    UnknownWallet(String),

    #[error("Widget endpoint error: {0}")]
    Endpoint(#[from] core_runtime::Error),

    #[error("Host bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

impl WidgetError {
    /// True for setup mistakes that must be fixed by the integrator.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, WidgetError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
