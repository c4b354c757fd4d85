#![deny(missing_docs)]
//! Super Bot - a Telegram bot bundling trivia, a shared finance ledger,
//! a Pomodoro timer, weather, music, word-of-the-day and anonymous
//! confessions behind a channel-membership gate.

/// Command routing, handlers and conversation state
pub mod bot;
/// Configuration management
pub mod config;
/// Liveness HTTP endpoint
pub mod liveness;
/// Telegram runtime entrypoint
pub mod runner;
/// External service adapters
pub mod services;
/// Stub collaborators for tests
pub mod testing;
