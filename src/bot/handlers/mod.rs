//! Command handlers and the default command table

pub mod content;
pub mod finance;
pub mod misc;
pub mod quiz;
pub mod study;

use super::context::BotContext;
use super::router::Router;
use std::sync::Arc;

/// Router with every bot command registered and free text bound to the quiz
/// answer check
#[must_use]
pub fn build_router(ctx: Arc<BotContext>, help_text: &str) -> Router {
    Router::new(ctx)
        .register("start", misc::StartCommand)
        .register("help", misc::HelpCommand::new(help_text))
        .register("confession", misc::ConfessionCommand)
        .register("quiz", quiz::QuizCommand)
        .register("finance", finance::FinanceCommand)
        .register("study", study::StudyCommand)
        .register("stop", study::StopCommand)
        .register("weather", content::WeatherCommand)
        .register("music", content::MusicCommand)
        .register("fitness", misc::FitnessCommand)
        .register("language", content::LanguageCommand)
        .on_text(quiz::AnswerHandler)
}
