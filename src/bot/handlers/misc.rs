//! `/start`, `/help`, `/confession` and `/fitness`.

use crate::bot::context::BotContext;
use crate::bot::error::CommandError;
use crate::bot::router::{CommandHandler, Event};

/// Welcome line for `/start`
pub const WELCOME: &str = "Welcome to Super Bot! Choose a feature: /quiz, /finance, /study, /weather, /music, /fitness, /language, /confession";
/// Usage line for `/fitness`
pub const FITNESS_USAGE: &str = "Use /fitness log <workout> to log a workout.";

/// Greets the user and lists the features
pub struct StartCommand;

#[async_trait::async_trait]
impl CommandHandler for StartCommand {
    async fn handle(&self, _ctx: &BotContext, _event: &Event) -> Result<String, CommandError> {
        Ok(WELCOME.to_string())
    }
}

/// Lists the available commands
pub struct HelpCommand {
    text: String,
}

impl HelpCommand {
    /// Help command replying `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait::async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(&self, _ctx: &BotContext, _event: &Event) -> Result<String, CommandError> {
        Ok(self.text.clone())
    }
}

/// Relays an anonymous confession to the group
pub struct ConfessionCommand;

#[async_trait::async_trait]
impl CommandHandler for ConfessionCommand {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        let confession = event.joined_args();
        if confession.is_empty() {
            return Err(CommandError::validation(
                "Please provide a confession after the command.",
            ));
        }

        ctx.broadcaster.broadcast(&confession).await.map_err(|e| {
            CommandError::upstream("Could not send your confession. Try again later.", e)
        })?;

        Ok("Your confession has been sent anonymously!".to_string())
    }
}

/// Logs and lists workouts for the session
pub struct FitnessCommand;

#[async_trait::async_trait]
impl CommandHandler for FitnessCommand {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        let args = event.args();
        let sub_command = args.first().map(|a| a.to_lowercase());

        match sub_command.as_deref() {
            Some("log") => {
                let workout = args[1..].join(" ");
                if workout.is_empty() {
                    return Err(CommandError::validation(
                        "Please describe the workout, e.g. /fitness log 5k run.",
                    ));
                }
                ctx.sessions.log_workout(event.user_id, workout.clone()).await;
                Ok(format!("Workout '{workout}' logged!"))
            }
            Some("list") => {
                let workouts = ctx.sessions.workouts(event.user_id).await;
                if workouts.is_empty() {
                    return Ok("No workouts logged yet.".to_string());
                }
                let lines: Vec<String> = workouts
                    .iter()
                    .enumerate()
                    .map(|(i, w)| format!("{}. {w}", i + 1))
                    .collect();
                Ok(format!("Your workouts:\n{}", lines.join("\n")))
            }
            _ => Ok(FITNESS_USAGE.to_string()),
        }
    }
}
