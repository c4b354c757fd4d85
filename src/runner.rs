//! Telegram runtime entrypoint.

use crate::bot::handlers::build_router;
use crate::bot::telegram::{
    get_user_id_safe, Command, TelegramBroadcaster, TelegramMembership, TelegramSink,
};
use crate::bot::{BotContext, Event, Ledger, MembershipGate, PomodoroScheduler, Router, SessionStore};
use crate::config::{
    get_pomodoro_break_minutes, get_pomodoro_work_minutes, get_session_idle_secs,
    get_session_max_capacity, minutes_to_duration, Settings, POMODORO_BREAK_MINUTES,
    POMODORO_WORK_MINUTES,
};
use crate::liveness;
use crate::services::{
    DictionaryClient, LastFmClient, MessageSink, OpenTriviaClient, OpenWeatherClient,
};
use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Run the bot and the liveness endpoint until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the liveness server fails.
pub async fn run_bot(settings: Arc<Settings>) -> Result<()> {
    let bot = Bot::new(settings.telegram_token.clone());
    let ctx = Arc::new(init_context(&settings, &bot));
    let router = Arc::new(build_router(
        ctx.clone(),
        &Command::descriptions().to_string(),
    ));

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register command menu: {}", e);
    }

    let shutdown = CancellationToken::new();
    let liveness_task = tokio::spawn(liveness::serve(settings.port, shutdown.clone()));

    info!("Bot is running...");

    Dispatcher::builder(bot, setup_handler())
        .dependencies(dptree::deps![router])
        .default_handler(|upd| async move {
            debug!("Unhandled update {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Shutting down...");
    ctx.pomodoro.shutdown().await;
    shutdown.cancel();
    liveness_task.await??;
    Ok(())
}

/// Wire the Telegram-backed collaborators and the web API clients together
#[must_use]
pub fn init_context(settings: &Settings, bot: &Bot) -> BotContext {
    if settings.channel().is_empty() {
        warn!("CHANNEL_LINK is not set; every user will be asked to join the channel.");
    }

    let idle_secs = get_session_idle_secs();
    let max_size = get_session_max_capacity();
    info!(
        "Initializing SessionStore (idle: {}s, max_size: {})",
        idle_secs, max_size
    );

    let work = minutes_to_duration(get_pomodoro_work_minutes(), POMODORO_WORK_MINUTES);
    let rest = minutes_to_duration(get_pomodoro_break_minutes(), POMODORO_BREAK_MINUTES);
    let sink: Arc<dyn MessageSink> = Arc::new(TelegramSink::new(bot.clone()));

    BotContext {
        gate: MembershipGate::new(
            Arc::new(TelegramMembership::new(bot.clone())),
            settings.channel(),
        ),
        sessions: SessionStore::new(idle_secs, max_size),
        ledger: Arc::new(Ledger::new()),
        pomodoro: Arc::new(PomodoroScheduler::new(sink, work, rest)),
        trivia: Arc::new(OpenTriviaClient::new()),
        weather: Arc::new(OpenWeatherClient::new(settings.weather_api_key.clone())),
        music: Arc::new(LastFmClient::new(settings.lastfm_api_key.clone())),
        dictionary: Arc::new(DictionaryClient::new()),
        broadcaster: Arc::new(TelegramBroadcaster::new(
            bot.clone(),
            settings.group_id.as_deref(),
        )),
    }
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(handle_message)
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    router: Arc<Router>,
) -> Result<(), teloxide::RequestError> {
    let Some(text) = msg.text() else {
        return respond(());
    };

    let event = Event::parse(get_user_id_safe(&msg), msg.chat.id.0, text);
    if let Some(reply) = router.dispatch(&event).await {
        if let Err(e) = bot.send_message(msg.chat.id, reply).await {
            error!("Failed to send reply to chat {}: {}", msg.chat.id, e);
        }
    }

    respond(())
}
