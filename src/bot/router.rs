//! Command routing
//!
//! Binds command names to handlers, runs the membership gate before every
//! handler and turns whatever the handler returns (including a panic) into a
//! reply. Plain text always goes to the text handler.

use super::context::BotContext;
use super::error::CommandError;
use futures_util::FutureExt;
use lazy_regex::regex_captures;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// What an inbound message asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// `/name arg1 arg2 ...`
    Command {
        /// Lowercased command name without the leading slash or `@bot` suffix
        name: String,
        /// Whitespace-split arguments
        args: Vec<String>,
    },
    /// Anything that is not a command
    Text(String),
}

/// One inbound chat event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Sender, identifies the session
    pub user_id: i64,
    /// Chat replies and reminders go to
    pub chat_id: i64,
    /// Parsed content
    pub kind: EventKind,
}

impl Event {
    /// Classify raw message text as a command or plain text
    ///
    /// # Examples
    ///
    /// ```
    /// use super_bot::bot::router::{Event, EventKind};
    ///
    /// let event = Event::parse(1, 1, "/Finance@SuperBot income 50");
    /// assert_eq!(
    ///     event.kind,
    ///     EventKind::Command {
    ///         name: "finance".to_string(),
    ///         args: vec!["income".to_string(), "50".to_string()],
    ///     }
    /// );
    /// ```
    #[must_use]
    pub fn parse(user_id: i64, chat_id: i64, text: &str) -> Self {
        let kind = match regex_captures!(r"^/(\w+)(?:@\w+)?(?:\s+([\s\S]*))?$", text.trim()) {
            Some((_, name, rest)) => EventKind::Command {
                name: name.to_lowercase(),
                args: rest.split_whitespace().map(ToString::to_string).collect(),
            },
            None => EventKind::Text(text.to_string()),
        };

        Self {
            user_id,
            chat_id,
            kind,
        }
    }

    /// Command arguments; empty for plain text
    #[must_use]
    pub fn args(&self) -> &[String] {
        match &self.kind {
            EventKind::Command { args, .. } => args,
            EventKind::Text(_) => &[],
        }
    }

    /// Arguments joined with single spaces
    #[must_use]
    pub fn joined_args(&self) -> String {
        self.args().join(" ")
    }

    /// Plain text body; empty for commands
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.kind {
            EventKind::Text(text) => text,
            EventKind::Command { .. } => "",
        }
    }
}

/// A unit of bot behaviour bound to a command name
#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handle `event` and produce the reply text
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError>;
}

/// Maps command names to handlers and dispatches events
pub struct Router {
    ctx: Arc<BotContext>,
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    text_handler: Option<Arc<dyn CommandHandler>>,
}

impl Router {
    /// Create an empty router over `ctx`
    #[must_use]
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            handlers: HashMap::new(),
            text_handler: None,
        }
    }

    /// Bind `name` (case-insensitive) to `handler`
    #[must_use]
    pub fn register(mut self, name: &str, handler: impl CommandHandler + 'static) -> Self {
        self.handlers.insert(name.to_lowercase(), Arc::new(handler));
        self
    }

    /// Handler receiving every plain-text message
    #[must_use]
    pub fn on_text(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.text_handler = Some(Arc::new(handler));
        self
    }

    /// Registered command names
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Shared handler context
    #[must_use]
    pub fn context(&self) -> &Arc<BotContext> {
        &self.ctx
    }

    /// Route an event and return the reply, if any.
    ///
    /// Unknown commands yield `None` without consulting the gate. Every other
    /// event yields a reply: the handler's output, or the message for the
    /// error it returned.
    pub async fn dispatch(&self, event: &Event) -> Option<String> {
        let handler = match &event.kind {
            EventKind::Command { name, .. } => {
                let Some(handler) = self.handlers.get(name) else {
                    debug!(user_id = event.user_id, "Ignoring unknown command /{name}");
                    return None;
                };
                handler
            }
            EventKind::Text(_) => self.text_handler.as_ref()?,
        };

        let result = if self.ctx.gate.is_member(event.user_id).await {
            AssertUnwindSafe(handler.handle(&self.ctx, event))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(CommandError::Internal(panic_message(&*panic))))
        } else {
            Err(CommandError::NotAMember)
        };

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                log_command_error(event, &e);
                e.user_message(self.ctx.gate.channel())
            }
        };
        Some(reply)
    }
}

fn log_command_error(event: &Event, err: &CommandError) {
    match err {
        CommandError::NotAMember => {
            debug!(user_id = event.user_id, "Denied non-member");
        }
        CommandError::Validation(message) => {
            debug!(user_id = event.user_id, "Validation failed: {message}");
        }
        CommandError::Upstream { source, .. } => {
            warn!(user_id = event.user_id, "Upstream failure: {source}");
        }
        CommandError::Internal(detail) => {
            error!(user_id = event.user_id, "Handler fault: {detail}");
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string())
}
