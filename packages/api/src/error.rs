use crate::realtime::packet::ProtocolError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("realtime protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("websocket error: {0}")]
    Socket(String),
    #[error(transparent)]
    Config(#[from] mood::ConfigError),
}
