//! `/quiz` and the free-text answer check.

use crate::bot::context::BotContext;
use crate::bot::error::CommandError;
use crate::bot::router::{CommandHandler, Event};
use rand::seq::SliceRandom;

/// Reply when the trivia service fails
pub const QUIZ_UNAVAILABLE: &str = "Could not fetch a trivia question right now. Try again later.";
/// Reply to free text when no question is pending
pub const NO_PENDING_QUESTION: &str = "There is no pending question. Send /quiz to get one.";
/// Reply to a correct answer
pub const CORRECT: &str = "Correct!";

/// Asks one multiple-choice trivia question and remembers its answer
pub struct QuizCommand;

#[async_trait::async_trait]
impl CommandHandler for QuizCommand {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        let question = ctx
            .trivia
            .fetch_question()
            .await
            .map_err(|e| CommandError::upstream(QUIZ_UNAVAILABLE, e))?;

        let mut options = question.incorrect_answers.clone();
        options.push(question.correct_answer.clone());
        options.shuffle(&mut rand::rng());

        ctx.sessions
            .set_pending_answer(event.user_id, question.correct_answer)
            .await;

        Ok(format!(
            "Question: {}\nOptions: {}",
            question.question,
            options.join(", ")
        ))
    }
}

/// Checks a free-text message against the pending quiz answer
///
/// Receives every plain-text message, whether or not a quiz is pending.
pub struct AnswerHandler;

#[async_trait::async_trait]
impl CommandHandler for AnswerHandler {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        let Some(correct_answer) = ctx.sessions.take_pending_answer(event.user_id).await else {
            return Err(CommandError::validation(NO_PENDING_QUESTION));
        };

        if event.text().trim().to_lowercase() == correct_answer.trim().to_lowercase() {
            Ok(CORRECT.to_string())
        } else {
            Ok(format!("Incorrect! The correct answer was: {correct_answer}"))
        }
    }
}
