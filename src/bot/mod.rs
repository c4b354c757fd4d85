/// Shared handler dependencies
pub mod context;
/// Handler error taxonomy
pub mod error;
/// Channel membership gate
pub mod gate;
/// Command handlers
pub mod handlers;
/// Income/expense ledger
pub mod ledger;
/// Pomodoro timer registry
pub mod pomodoro;
/// Command routing
pub mod router;
/// Per-session conversation state
pub mod session;
/// Telegram-backed collaborators and command list
pub mod telegram;

pub use context::BotContext;
pub use gate::MembershipGate;
pub use ledger::Ledger;
pub use pomodoro::PomodoroScheduler;
pub use router::{Event, EventKind, Router};
pub use session::SessionStore;
