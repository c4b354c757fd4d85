//! Testing helpers and stub collaborators.
//!
//! Hermetic stand-ins for the external services so the router, handlers and
//! timer can be exercised without network access.

use crate::bot::handlers::build_router;
use crate::bot::{BotContext, Ledger, MembershipGate, PomodoroScheduler, Router, SessionStore};
use crate::services::{
    DictionaryProvider, GroupBroadcaster, MembershipChecker, MembershipStatus, MessageSink,
    MusicProvider, ServiceError, Track, TriviaProvider, TriviaQuestion, WeatherProvider,
    WeatherReport, WordEntry,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Membership lookup returning a fixed status, or an error when `None`
pub struct FixedMembership {
    status: Option<MembershipStatus>,
    calls: AtomicUsize,
}

impl FixedMembership {
    /// Always answers `status`
    #[must_use]
    pub const fn new(status: MembershipStatus) -> Self {
        Self {
            status: Some(status),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails with a Telegram error
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            status: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups performed
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MembershipChecker for FixedMembership {
    async fn membership_status(
        &self,
        _channel: &str,
        _user_id: i64,
    ) -> Result<MembershipStatus, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.status
            .ok_or_else(|| ServiceError::Telegram("Bad Request: chat not found".to_string()))
    }
}

/// Trivia source serving one fixed question
pub struct StaticTrivia {
    question: TriviaQuestion,
    calls: AtomicUsize,
}

impl StaticTrivia {
    /// Serves `question` on every call
    #[must_use]
    pub const fn new(question: TriviaQuestion) -> Self {
        Self {
            question,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of questions fetched
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TriviaProvider for StaticTrivia {
    async fn fetch_question(&self) -> Result<TriviaQuestion, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.question.clone())
    }
}

/// A sample question about Hamlet
#[must_use]
pub fn sample_question() -> TriviaQuestion {
    TriviaQuestion {
        question: "Who wrote \"Hamlet\"?".to_string(),
        correct_answer: "William Shakespeare".to_string(),
        incorrect_answers: vec![
            "Charles Dickens".to_string(),
            "Jane Austen".to_string(),
            "Mark Twain".to_string(),
        ],
    }
}

/// Every content service failing with a network error
pub struct OfflineServices;

#[async_trait::async_trait]
impl TriviaProvider for OfflineServices {
    async fn fetch_question(&self) -> Result<TriviaQuestion, ServiceError> {
        Err(offline())
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OfflineServices {
    async fn current_weather(&self, _city: &str) -> Result<Option<WeatherReport>, ServiceError> {
        Err(offline())
    }
}

#[async_trait::async_trait]
impl MusicProvider for OfflineServices {
    async fn top_track(&self, _genre: &str) -> Result<Option<Track>, ServiceError> {
        Err(offline())
    }
}

#[async_trait::async_trait]
impl DictionaryProvider for OfflineServices {
    async fn lookup(&self, _word: &str) -> Result<WordEntry, ServiceError> {
        Err(offline())
    }
}

#[async_trait::async_trait]
impl GroupBroadcaster for OfflineServices {
    async fn broadcast(&self, _text: &str) -> Result<(), ServiceError> {
        Err(offline())
    }
}

fn offline() -> ServiceError {
    ServiceError::Network("connection refused".to_string())
}

/// Records every message it is asked to send
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingSink {
    /// Messages sent so far as `(chat_id, text)`
    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// How many sent messages equal `text`
    pub fn count(&self, text: &str) -> usize {
        self.sent().iter().filter(|(_, t)| t == text).count()
    }
}

#[async_trait::async_trait]
impl MessageSink for RecordingSink {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), ServiceError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((chat_id, text.to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl GroupBroadcaster for RecordingSink {
    async fn broadcast(&self, text: &str) -> Result<(), ServiceError> {
        self.send_text(0, text).await
    }
}

/// Collaborators plugged into [`test_context`]
pub struct TestCollaborators {
    /// Membership lookup behind the gate
    pub membership: Arc<FixedMembership>,
    /// Trivia source
    pub trivia: Arc<dyn TriviaProvider>,
    /// Reply sink used by the Pomodoro timer
    pub sink: Arc<RecordingSink>,
    /// Confession relay
    pub broadcaster: Arc<dyn GroupBroadcaster>,
}

impl Default for TestCollaborators {
    fn default() -> Self {
        Self {
            membership: Arc::new(FixedMembership::new(MembershipStatus::Member)),
            trivia: Arc::new(StaticTrivia::new(sample_question())),
            sink: Arc::new(RecordingSink::default()),
            broadcaster: Arc::new(RecordingSink::default()),
        }
    }
}

/// Fresh context: empty ledger and sessions, 25/5 minute Pomodoro, offline
/// weather, music and dictionary services
#[must_use]
pub fn test_context(collaborators: &TestCollaborators) -> Arc<BotContext> {
    let sink: Arc<dyn MessageSink> = collaborators.sink.clone();
    Arc::new(BotContext {
        gate: MembershipGate::new(collaborators.membership.clone(), "@superchannel"),
        sessions: SessionStore::new(3600, 100),
        ledger: Arc::new(Ledger::new()),
        pomodoro: Arc::new(PomodoroScheduler::new(
            sink,
            Duration::from_secs(25 * 60),
            Duration::from_secs(5 * 60),
        )),
        trivia: collaborators.trivia.clone(),
        weather: Arc::new(OfflineServices),
        music: Arc::new(OfflineServices),
        dictionary: Arc::new(OfflineServices),
        broadcaster: collaborators.broadcaster.clone(),
    })
}

/// Default router over [`test_context`]
#[must_use]
pub fn test_router(collaborators: &TestCollaborators) -> Router {
    build_router(test_context(collaborators), "Supported commands:")
}
