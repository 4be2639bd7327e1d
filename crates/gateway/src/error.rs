use argentum_core::ArgentumError;
use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Argentum(#[from] ArgentumError),

    #[error("gateway '{gateway}' does not support {operation}")]
    Unsupported {
        gateway: String,
        operation: &'static str,
    },

    #[error("invalid registry configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl GatewayError {
    pub fn unsupported(gateway: impl Into<String>, operation: &'static str) -> Self {
        Self::Unsupported {
            gateway: gateway.into(),
            operation,
        }
    }

    /// The core error, when this wraps one.
    pub fn as_argentum(&self) -> Option<&ArgentumError> {
        match self {
            GatewayError::Argentum(err) => Some(err),
            _ => None,
        }
    }
}
