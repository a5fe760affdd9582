use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The receiving context is gone (extension reload, page teardown)
    #[error("message channel closed")]
    ChannelClosed,

    #[error("invalid toggle shortcut: {0}")]
    InvalidShortcut(&'static str),

    #[error("malformed runtime message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
