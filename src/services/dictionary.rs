//! Free Dictionary API client and the word-of-the-day picker.

use super::http_utils::{create_http_client, extract_str, get_json};
use super::{DictionaryProvider, ServiceError, WordEntry};
use chrono::{Datelike, NaiveDate};
use reqwest::Client as HttpClient;
use serde_json::Value;

const DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Words rotated through by `/language`
pub const WORDS_OF_THE_DAY: &[&str] = &[
    "serendipity",
    "ephemeral",
    "ubiquitous",
    "resilience",
    "eloquent",
    "meticulous",
    "benevolent",
    "candid",
    "diligent",
    "gregarious",
    "inquisitive",
    "luminous",
    "pragmatic",
    "tenacious",
    "whimsical",
    "zealous",
    "ambiguous",
    "cogent",
    "frugal",
    "nostalgia",
    "quintessential",
    "sanguine",
    "verbose",
    "wanderlust",
];

/// Deterministic word for `date`; the same calendar day always yields the same word.
#[must_use]
pub fn word_of_the_day(date: NaiveDate) -> &'static str {
    let index = usize::try_from(date.num_days_from_ce().unsigned_abs()).unwrap_or_default()
        % WORDS_OF_THE_DAY.len();
    WORDS_OF_THE_DAY[index]
}

/// Looks up English words on dictionaryapi.dev
pub struct DictionaryClient {
    http_client: HttpClient,
    base_url: String,
}

impl DictionaryClient {
    /// Create a client against the public API
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DICTIONARY_URL)
    }

    /// Create a client against a custom endpoint
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: create_http_client(),
            base_url: base_url.into(),
        }
    }
}

impl Default for DictionaryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DictionaryProvider for DictionaryClient {
    async fn lookup(&self, word: &str) -> Result<WordEntry, ServiceError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), word);
        let body = get_json(&self.http_client, &url, &[]).await?;
        parse_entry(&body)
    }
}

/// Parse the first entry of a dictionary payload (an array of entries).
pub(crate) fn parse_entry(body: &Value) -> Result<WordEntry, ServiceError> {
    let word = extract_str(body, &["0", "word"])?;
    let part_of_speech = extract_str(body, &["0", "meanings", "0", "partOfSpeech"]).ok();
    let definition =
        extract_str(body, &["0", "meanings", "0", "definitions", "0", "definition"]).ok();

    Ok(WordEntry {
        word,
        part_of_speech,
        definition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_entry_first_definition() -> Result<(), ServiceError> {
        let body = json!([{
            "word": "candid",
            "meanings": [{
                "partOfSpeech": "adjective",
                "definitions": [
                    {"definition": "Impartial and fair."},
                    {"definition": "Straightforward, open and sincere."}
                ]
            }]
        }]);
        let entry = parse_entry(&body)?;
        assert_eq!(entry.word, "candid");
        assert_eq!(entry.part_of_speech.as_deref(), Some("adjective"));
        assert_eq!(entry.definition.as_deref(), Some("Impartial and fair."));
        Ok(())
    }

    #[test]
    fn test_parse_entry_without_meanings() -> Result<(), ServiceError> {
        let entry = parse_entry(&json!([{"word": "frugal"}]))?;
        assert_eq!(entry.word, "frugal");
        assert_eq!(entry.definition, None);
        Ok(())
    }

    #[test]
    fn test_parse_entry_not_found_payload() {
        let body = json!({"title": "No Definitions Found"});
        assert!(parse_entry(&body).is_err());
    }

    #[test]
    fn test_word_of_the_day_is_stable_per_day() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 18);
        let next = NaiveDate::from_ymd_opt(2026, 10, 19);
        let (Some(day), Some(next)) = (day, next) else {
            panic!("valid dates");
        };
        assert_eq!(word_of_the_day(day), word_of_the_day(day));
        assert_ne!(word_of_the_day(day), word_of_the_day(next));
    }
}
