use std::fmt;

use crate::types::PostId;

pub const EMPTY_POST_MESSAGE: &str = "Please write something before posting.";
pub const SIGN_IN_MESSAGE: &str = "Please enter both username and password.";
pub const SIGN_UP_MESSAGE: &str = "Please enter your full name.";

#[derive(Debug)]
pub enum AppError {
    /// Rejected user input. The message is shown inline.
    Validation(String),
    NotFound(PostId),
    /// Browser storage or cookie API failure.
    Storage(String),
    /// The stored post list is not valid JSON for the post schema.
    Corrupt(serde_json::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// Message suitable for display next to a form, if this error has one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Validation(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::NotFound(id) => write!(f, "post {} not found", id),
            AppError::Storage(msg) => write!(f, "storage error: {}", msg),
            AppError::Corrupt(err) => write!(f, "stored posts are corrupt: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Corrupt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Corrupt(err)
    }
}

impl From<wasm_bindgen::JsValue> for AppError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        AppError::Storage(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
