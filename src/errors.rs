use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

use crate::core::types::ApiErrorCode;

/// Every failure the calendar core, its collaborators and the CLI can raise.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Input ----------------------------------------------------------------
    /// Malformed user or file input (timestamps, numbers, CLI args).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required form field is missing or out of range. Raised before
    /// anything is submitted.
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    // ---- Remote collaborator --------------------------------------------------
    /// Coded business-rule rejection returned by the demos API.
    #[error("Rejected by server: {0}")]
    Rejected(ApiErrorCode),

    /// Network or protocol level failure talking to the demos API.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Lookup of a local entity by id failed.
    #[error("{kind} '{id}' not found.")]
    NotFound { kind: &'static str, id: String },

    // ---- Config ---------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing configuration item: {item}")]
    ConfigItemMissing { item: &'static str },

    // ---- Plumbing -------------------------------------------------------------
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn validation<S: Into<String>>(field: &'static str, msg: S) -> Self {
        Error::Validation {
            field,
            message: msg.into(),
        }
    }
    pub fn not_found<S: Into<String>>(kind: &'static str, id: S) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Business-rule rejections are expected outcomes; everything else the
    /// caller should treat as a failed operation.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected(_))
    }
}

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}

/// Map an `Option<T>` into `Result<T, Error::ConfigItemMissing>` with a static key.
pub fn require_config_item<T>(opt: Option<T>, item: &'static str) -> Result<T> {
    opt.ok_or_else(|| Error::ConfigItemMissing { item })
}
