//! External service adapters
//!
//! Thin request/response wrappers over the trivia, weather, music and
//! dictionary web APIs, plus the messaging collaborators (membership lookup,
//! reply sink, group broadcast) the bot talks to.

pub mod dictionary;
mod http_utils;
pub mod music;
pub mod trivia;
pub mod weather;

pub use dictionary::DictionaryClient;
pub use http_utils::create_http_client;
pub use music::LastFmClient;
pub use trivia::OpenTriviaClient;
pub use weather::OpenWeatherClient;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to an external service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Error returned by the service's API
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body or description
        message: String,
    },
    /// Error during network communication
    #[error("Network error: {0}")]
    Network(String),
    /// Unexpected or malformed payload
    #[error("JSON error: {0}")]
    Json(String),
    /// Missing API key or other configuration
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
    /// Telegram Bot API failure
    #[error("Telegram error: {0}")]
    Telegram(String),
}

/// One multiple-choice trivia question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    /// Question text
    pub question: String,
    /// The single correct answer
    pub correct_answer: String,
    /// Distractors
    pub incorrect_answers: Vec<String>,
}

/// Current weather for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Human readable description, e.g. "light rain"
    pub description: String,
    /// Temperature in degrees Celsius
    pub temperature: f64,
}

/// Top track for a genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub name: String,
    /// Artist name
    pub artist: String,
}

/// Dictionary entry for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The word itself
    pub word: String,
    /// Part of speech of the first meaning
    pub part_of_speech: Option<String>,
    /// First definition of the first meaning
    pub definition: Option<String>,
}

/// Membership of a user in the gating channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipStatus {
    /// Regular member
    Member,
    /// Channel administrator
    Administrator,
    /// Channel creator
    Owner,
    /// Not a member (left, banned, restricted or unknown)
    None,
}

impl MembershipStatus {
    /// Whether this status grants access to the bot
    #[must_use]
    pub const fn is_member(self) -> bool {
        matches!(self, Self::Member | Self::Administrator | Self::Owner)
    }
}

/// Source of trivia questions
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TriviaProvider: Send + Sync {
    /// Fetch a single multiple-choice question
    async fn fetch_question(&self) -> Result<TriviaQuestion, ServiceError>;
}

/// Source of current weather
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Look up the weather for `city`; `Ok(None)` when the city is unknown
    async fn current_weather(&self, city: &str) -> Result<Option<WeatherReport>, ServiceError>;
}

/// Source of music recommendations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MusicProvider: Send + Sync {
    /// Top track for `genre`; `Ok(None)` when the service reports no match
    async fn top_track(&self, genre: &str) -> Result<Option<Track>, ServiceError>;
}

/// Word lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Look up `word` in the dictionary
    async fn lookup(&self, word: &str) -> Result<WordEntry, ServiceError>;
}

/// Membership-status collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MembershipChecker: Send + Sync {
    /// Status of `user_id` in `channel`
    async fn membership_status(
        &self,
        channel: &str,
        user_id: i64,
    ) -> Result<MembershipStatus, ServiceError>;
}

/// Send-text-to-chat primitive
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    /// Send `text` to `chat_id`
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), ServiceError>;
}

/// Send-text-to-fixed-group primitive
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GroupBroadcaster: Send + Sync {
    /// Post `text` to the configured group
    async fn broadcast(&self, text: &str) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_statuses() {
        assert!(MembershipStatus::Member.is_member());
        assert!(MembershipStatus::Administrator.is_member());
        assert!(MembershipStatus::Owner.is_member());
        assert!(!MembershipStatus::None.is_member());
    }

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::Api {
            status: 404,
            message: "city not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 - city not found");
    }
}
