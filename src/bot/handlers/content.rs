//! Commands backed by a content service: `/weather`, `/music`, `/language`.

use crate::bot::context::BotContext;
use crate::bot::error::CommandError;
use crate::bot::router::{CommandHandler, Event};
use crate::services::dictionary::word_of_the_day;
use chrono::Utc;

/// Current weather for a city
pub struct WeatherCommand;

#[async_trait::async_trait]
impl CommandHandler for WeatherCommand {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        let city = event.joined_args();
        if city.is_empty() {
            return Err(CommandError::validation("Please provide a city name."));
        }

        let report = ctx.weather.current_weather(&city).await.map_err(|e| {
            CommandError::upstream("Could not fetch the weather right now. Try again later.", e)
        })?;

        Ok(match report {
            Some(report) => format!(
                "Weather in {city}:\n{}\nTemperature: {}°C",
                report.description, report.temperature
            ),
            None => "City not found!".to_string(),
        })
    }
}

/// Top track for a genre
pub struct MusicCommand;

#[async_trait::async_trait]
impl CommandHandler for MusicCommand {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        let genre = event.joined_args();
        if genre.is_empty() {
            return Err(CommandError::validation(
                "Please provide a genre (e.g., /music pop).",
            ));
        }

        let track = ctx
            .music
            .top_track(&genre)
            .await
            .map_err(|e| CommandError::upstream("Could not find music for that genre.", e))?;

        Ok(match track {
            Some(track) => format!("Top {genre} track: {} by {}", track.name, track.artist),
            None => "Could not find music for that genre.".to_string(),
        })
    }
}

/// Word of the day with its first definition
pub struct LanguageCommand;

#[async_trait::async_trait]
impl CommandHandler for LanguageCommand {
    async fn handle(&self, ctx: &BotContext, _event: &Event) -> Result<String, CommandError> {
        let word = word_of_the_day(Utc::now().date_naive());
        let entry = ctx.dictionary.lookup(word).await.map_err(|e| {
            CommandError::upstream("Could not fetch the word of the day. Try again later.", e)
        })?;

        let word = entry.word;
        Ok(match (entry.part_of_speech, entry.definition) {
            (Some(pos), Some(definition)) => {
                format!("Word of the Day: {word}\n({pos}) {definition}")
            }
            (None, Some(definition)) => format!("Word of the Day: {word}\n{definition}"),
            (_, None) => format!("Word of the Day: {word}"),
        })
    }
}
