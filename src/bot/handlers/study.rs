//! `/study` and `/stop`: the Pomodoro timer.

use crate::bot::context::BotContext;
use crate::bot::error::CommandError;
use crate::bot::pomodoro::StartOutcome;
use crate::bot::router::{CommandHandler, Event};

/// Reply when a timer already runs for the session
pub const ALREADY_RUNNING: &str = "A Pomodoro timer is already running. Send /stop to cancel it.";
/// Reply after a timer was cancelled
pub const TIMER_STOPPED: &str = "Pomodoro timer stopped.";
/// Reply to `/stop` without a timer
pub const NO_TIMER: &str = "No Pomodoro timer is running.";

/// Starts the session's Pomodoro timer in the background
pub struct StudyCommand;

#[async_trait::async_trait]
impl CommandHandler for StudyCommand {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        match ctx.pomodoro.start(event.user_id, event.chat_id).await {
            StartOutcome::Started => Ok(format!(
                "Pomodoro timer started! Work for {} minutes, then take a {}-minute break.",
                ctx.pomodoro.work_minutes(),
                ctx.pomodoro.break_minutes()
            )),
            StartOutcome::AlreadyRunning => Ok(ALREADY_RUNNING.to_string()),
        }
    }
}

/// Cancels the session's Pomodoro timer
pub struct StopCommand;

#[async_trait::async_trait]
impl CommandHandler for StopCommand {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        if ctx.pomodoro.stop(event.user_id).await {
            Ok(TIMER_STOPPED.to_string())
        } else {
            Ok(NO_TIMER.to_string())
        }
    }
}
