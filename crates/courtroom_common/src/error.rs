//! Error types for Karma Courtroom.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourtroomError {
    #[error("No post available for judgment")]
    NoActivePost,

    #[error("Unknown verdict: {0}")]
    UnknownVerdict(String),

    #[error("Stats store error: {0}")]
    Store(String),

    #[error("Post supply error: {0}")]
    Supply(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
