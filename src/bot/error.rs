//! Handler error taxonomy and its conversion to user-visible replies.

use crate::services::ServiceError;
use thiserror::Error;

/// Reply used when a handler fails for an unexpected reason.
pub const INTERNAL_FAULT_REPLY: &str = "Something went wrong while handling that command.";

/// Errors a command handler may return; each one becomes a reply.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The membership gate denied access
    #[error("user is not a member of the channel")]
    NotAMember,
    /// Malformed command arguments; carries the corrective message
    #[error("validation error: {0}")]
    Validation(String),
    /// An external collaborator failed
    #[error("upstream error: {source}")]
    Upstream {
        /// Message shown to the user
        message: String,
        /// Underlying adapter failure
        #[source]
        source: ServiceError,
    },
    /// Programming defect caught at the handler boundary
    #[error("internal fault: {0}")]
    Internal(String),
}

impl CommandError {
    /// Validation error with a corrective message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Upstream failure with the message the user should see
    pub fn upstream(message: impl Into<String>, source: ServiceError) -> Self {
        Self::Upstream {
            message: message.into(),
            source,
        }
    }

    /// Text sent back to the user for this error
    #[must_use]
    pub fn user_message(&self, channel: &str) -> String {
        match self {
            Self::NotAMember => join_prompt(channel),
            Self::Validation(message) | Self::Upstream { message, .. } => message.clone(),
            Self::Internal(_) => INTERNAL_FAULT_REPLY.to_string(),
        }
    }
}

/// Prompt shown to users who have not joined the gating channel
#[must_use]
pub fn join_prompt(channel: &str) -> String {
    format!("Please join the channel first: {channel}")
}
