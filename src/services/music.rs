//! Last.fm client for genre top tracks.

use super::http_utils::{create_http_client, extract_str, get_json};
use super::{MusicProvider, ServiceError, Track};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::debug;

const LASTFM_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// `tag.gettoptracks` lookups
pub struct LastFmClient {
    http_client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl LastFmClient {
    /// Create a client against the public API
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(LASTFM_URL, api_key)
    }

    /// Create a client against a custom endpoint
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client: create_http_client(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl MusicProvider for LastFmClient {
    async fn top_track(&self, genre: &str) -> Result<Option<Track>, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingConfig("LASTFM_API_KEY".to_string()))?;

        let query = [
            ("method", "tag.gettoptracks"),
            ("tag", genre),
            ("api_key", api_key),
            ("format", "json"),
        ];
        let body = get_json(&self.http_client, &self.base_url, &query).await?;
        parse_top_track(&body)
    }
}

/// Parse the first track of a `tag.gettoptracks` payload.
///
/// Last.fm reports failures in-band with an `error` field; those and an empty
/// track list both mean "no recommendation".
pub(crate) fn parse_top_track(body: &Value) -> Result<Option<Track>, ServiceError> {
    if let Some(code) = body.get("error") {
        debug!("Last.fm returned error {code}");
        return Ok(None);
    }

    let has_tracks = body
        .pointer("/tracks/track")
        .and_then(Value::as_array)
        .is_some_and(|tracks| !tracks.is_empty());
    if !has_tracks {
        return Ok(None);
    }

    Ok(Some(Track {
        name: extract_str(body, &["tracks", "track", "0", "name"])?,
        artist: extract_str(body, &["tracks", "track", "0", "artist", "name"])?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_top_track() -> Result<(), ServiceError> {
        let body = json!({
            "tracks": {"track": [
                {"name": "Blinding Lights", "artist": {"name": "The Weeknd"}},
                {"name": "Levitating", "artist": {"name": "Dua Lipa"}}
            ]}
        });
        let track = parse_top_track(&body)?;
        assert_eq!(
            track,
            Some(Track {
                name: "Blinding Lights".to_string(),
                artist: "The Weeknd".to_string(),
            })
        );
        Ok(())
    }

    #[test]
    fn test_parse_top_track_error_indicator() -> Result<(), ServiceError> {
        let body = json!({"error": 6, "message": "Tag not found"});
        assert_eq!(parse_top_track(&body)?, None);
        Ok(())
    }

    #[test]
    fn test_parse_top_track_empty_list() -> Result<(), ServiceError> {
        let body = json!({"tracks": {"track": []}});
        assert_eq!(parse_top_track(&body)?, None);
        Ok(())
    }
}
