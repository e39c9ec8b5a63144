//! Request and response bodies
//!
//! All JSON keys are camelCase. Monetary figures go out as plain numbers.

pub mod auth;
pub mod student;
pub mod simulation;

use serde::Serialize;

/// A body carrying only a human-readable message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
