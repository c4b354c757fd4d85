//! Shared dependencies handed to every command handler.

use super::gate::MembershipGate;
use super::ledger::Ledger;
use super::pomodoro::PomodoroScheduler;
use super::session::SessionStore;
use crate::services::{
    DictionaryProvider, GroupBroadcaster, MusicProvider, TriviaProvider, WeatherProvider,
};
use std::sync::Arc;

/// Stores and collaborators the handlers operate on
///
/// Built once at startup (or once per test) and shared by reference; nothing
/// in here is a process-wide singleton.
#[derive(Clone)]
pub struct BotContext {
    /// Channel membership check run before every handler
    pub gate: MembershipGate,
    /// Per-session conversation state
    pub sessions: SessionStore,
    /// Income/expense totals shared by all sessions
    pub ledger: Arc<Ledger>,
    /// Running Pomodoro timers
    pub pomodoro: Arc<PomodoroScheduler>,
    /// Trivia questions for `/quiz`
    pub trivia: Arc<dyn TriviaProvider>,
    /// Weather lookups for `/weather`
    pub weather: Arc<dyn WeatherProvider>,
    /// Track recommendations for `/music`
    pub music: Arc<dyn MusicProvider>,
    /// Word lookups for `/language`
    pub dictionary: Arc<dyn DictionaryProvider>,
    /// Anonymous confession relay
    pub broadcaster: Arc<dyn GroupBroadcaster>,
}
