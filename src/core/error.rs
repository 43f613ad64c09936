use thiserror::Error;

/// Gateway-wide error model for uniform CLI/boot error mapping.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Message(String),
}

impl From<anyhow::Error> for GatewayError {
    fn from(e: anyhow::Error) -> Self {
        GatewayError::Message(e.to_string())
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Message(e.to_string())
    }
}

impl From<String> for GatewayError {
    fn from(e: String) -> Self {
        GatewayError::Message(e)
    }
}

impl From<&str> for GatewayError {
    fn from(e: &str) -> Self {
        GatewayError::Message(e.to_string())
    }
}
