//! Telegram implementations of the messaging collaborators
//!
//! Membership lookup, reply sink and group broadcast backed by the Bot API,
//! plus the command list shown in the Telegram menu.

use crate::services::{
    GroupBroadcaster, MembershipChecker, MembershipStatus, MessageSink, ServiceError,
};
use teloxide::prelude::*;
use teloxide::types::{ChatMemberStatus, Recipient};
use teloxide::utils::command::BotCommands;

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Start the bot and show welcome message
    #[command(description = "Start the bot.")]
    Start,
    /// Show this list
    #[command(description = "Show available commands.")]
    Help,
    /// Answer a trivia question
    #[command(description = "Get a trivia question.")]
    Quiz,
    /// Track income and expenses
    #[command(description = "income <amount> | expense <amount> | balance")]
    Finance,
    /// Start a Pomodoro timer
    #[command(description = "Start a Pomodoro timer (25 min work, 5 min break).")]
    Study,
    /// Stop the Pomodoro timer
    #[command(description = "Stop the Pomodoro timer.")]
    Stop,
    /// Weather for a city
    #[command(description = "weather <city>")]
    Weather,
    /// Top track for a genre
    #[command(description = "music <genre>")]
    Music,
    /// Workout log
    #[command(description = "log <workout> | list")]
    Fitness,
    /// Word of the day
    #[command(description = "Learn the word of the day.")]
    Language,
    /// Anonymous confession
    #[command(description = "confession <text> (sent anonymously to the group)")]
    Confession,
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
#[must_use]
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Numeric ids become chat ids, anything else a channel/group username.
#[must_use]
pub fn parse_recipient(target: &str) -> Recipient {
    let target = target.trim();
    match target.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if target.starts_with('@') => Recipient::ChannelUsername(target.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{target}")),
    }
}

/// Maps a Bot API member status onto the gate's view of membership
#[must_use]
pub const fn map_status(status: ChatMemberStatus) -> MembershipStatus {
    match status {
        ChatMemberStatus::Owner => MembershipStatus::Owner,
        ChatMemberStatus::Administrator => MembershipStatus::Administrator,
        ChatMemberStatus::Member => MembershipStatus::Member,
        _ => MembershipStatus::None,
    }
}

/// `getChatMember`-backed membership lookup
pub struct TelegramMembership {
    bot: Bot,
}

impl TelegramMembership {
    /// Lookup using `bot`
    #[must_use]
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait::async_trait]
impl MembershipChecker for TelegramMembership {
    async fn membership_status(
        &self,
        channel: &str,
        user_id: i64,
    ) -> Result<MembershipStatus, ServiceError> {
        if channel.trim().is_empty() {
            return Err(ServiceError::MissingConfig("CHANNEL_LINK".to_string()));
        }

        let member = self
            .bot
            .get_chat_member(parse_recipient(channel), UserId(user_id.cast_unsigned()))
            .await
            .map_err(|e| ServiceError::Telegram(e.to_string()))?;

        Ok(map_status(member.kind.status()))
    }
}

/// Sends plain text to a chat
#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    /// Sink using `bot`
    #[must_use]
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait::async_trait]
impl MessageSink for TelegramSink {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), ServiceError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map(|_| ())
            .map_err(|e| ServiceError::Telegram(e.to_string()))
    }
}

/// Posts to the configured confession group
pub struct TelegramBroadcaster {
    bot: Bot,
    group: Option<Recipient>,
}

impl TelegramBroadcaster {
    /// Broadcaster posting to `group_id`; `None` makes every broadcast fail
    #[must_use]
    pub fn new(bot: Bot, group_id: Option<&str>) -> Self {
        Self {
            bot,
            group: group_id
                .filter(|g| !g.trim().is_empty())
                .map(parse_recipient),
        }
    }
}

#[async_trait::async_trait]
impl GroupBroadcaster for TelegramBroadcaster {
    async fn broadcast(&self, text: &str) -> Result<(), ServiceError> {
        let group = self
            .group
            .clone()
            .ok_or_else(|| ServiceError::MissingConfig("GROUP_ID".to_string()))?;

        self.bot
            .send_message(group, text)
            .await
            .map(|_| ())
            .map_err(|e| ServiceError::Telegram(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipient() {
        assert_eq!(parse_recipient("-100123"), Recipient::Id(ChatId(-100_123)));
        assert_eq!(
            parse_recipient("@superchannel"),
            Recipient::ChannelUsername("@superchannel".to_string())
        );
        assert_eq!(
            parse_recipient("superchannel"),
            Recipient::ChannelUsername("@superchannel".to_string())
        );
    }

    #[test]
    fn test_map_status() {
        assert_eq!(map_status(ChatMemberStatus::Owner), MembershipStatus::Owner);
        assert_eq!(
            map_status(ChatMemberStatus::Administrator),
            MembershipStatus::Administrator
        );
        assert_eq!(map_status(ChatMemberStatus::Member), MembershipStatus::Member);
        assert_eq!(map_status(ChatMemberStatus::Left), MembershipStatus::None);
        assert_eq!(map_status(ChatMemberStatus::Banned), MembershipStatus::None);
    }

    #[test]
    fn test_command_descriptions_list_every_command() {
        let help = Command::descriptions().to_string();
        for name in ["/start", "/quiz", "/finance", "/study", "/stop", "/confession"] {
            assert!(help.contains(name), "{name} missing from help");
        }
    }

    #[tokio::test]
    async fn test_broadcast_without_group_fails() {
        let broadcaster = TelegramBroadcaster::new(Bot::new("dummy"), None);
        assert!(matches!(
            broadcaster.broadcast("hi").await,
            Err(ServiceError::MissingConfig(_))
        ));
    }
}
