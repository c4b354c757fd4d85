//! Open Trivia Database client.

use super::http_utils::{create_http_client, extract_str, get_json};
use super::{ServiceError, TriviaProvider, TriviaQuestion};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::debug;

const OPEN_TRIVIA_URL: &str = "https://opentdb.com/api.php";

/// Fetches multiple-choice questions from opentdb.com
pub struct OpenTriviaClient {
    http_client: HttpClient,
    base_url: String,
}

impl OpenTriviaClient {
    /// Create a client against the public API
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(OPEN_TRIVIA_URL)
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

impl Default for OpenTriviaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TriviaProvider for OpenTriviaClient {
    async fn fetch_question(&self) -> Result<TriviaQuestion, ServiceError> {
        let body = get_json(
            &self.http_client,
            &self.base_url,
            &[("amount", "1"), ("type", "multiple")],
        )
        .await?;
        debug!("Trivia response received");
        parse_question(&body)
    }
}

/// Parse the first question of an opentdb payload.
///
/// The service HTML-encodes question and answer text; entities are decoded here.
pub(crate) fn parse_question(body: &Value) -> Result<TriviaQuestion, ServiceError> {
    // response_code 0 is success; 1..=5 signal empty results, bad params, token or rate issues
    if let Some(code) = body.get("response_code").and_then(Value::as_i64) {
        if code != 0 {
            return Err(ServiceError::Api {
                status: 200,
                message: format!("trivia response_code {code}"),
            });
        }
    }

    let question = decode(&extract_str(body, &["results", "0", "question"])?);
    let correct_answer = decode(&extract_str(body, &["results", "0", "correct_answer"])?);
    let incorrect_answers = body
        .pointer("/results/0/incorrect_answers")
        .and_then(Value::as_array)
        .ok_or_else(|| ServiceError::Json("missing incorrect_answers".to_string()))?
        .iter()
        .filter_map(Value::as_str)
        .map(decode)
        .collect();

    Ok(TriviaQuestion {
        question,
        correct_answer,
        incorrect_answers,
    })
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_question_decodes_entities() -> Result<(), ServiceError> {
        let body = json!({
            "response_code": 0,
            "results": [{
                "type": "multiple",
                "question": "Who wrote &quot;Hamlet&quot;?",
                "correct_answer": "William Shakespeare",
                "incorrect_answers": ["Charles Dickens", "Jane Austen", "O&#039;Neill"]
            }]
        });

        let q = parse_question(&body)?;
        assert_eq!(q.question, "Who wrote \"Hamlet\"?");
        assert_eq!(q.correct_answer, "William Shakespeare");
        assert_eq!(q.incorrect_answers.len(), 3);
        assert_eq!(q.incorrect_answers[2], "O'Neill");
        Ok(())
    }

    #[test]
    fn test_parse_question_rejects_error_code() {
        let body = json!({"response_code": 5, "results": []});
        assert!(matches!(
            parse_question(&body),
            Err(ServiceError::Api { .. })
        ));
    }

    #[test]
    fn test_parse_question_empty_results() {
        let body = json!({"results": []});
        assert!(matches!(parse_question(&body), Err(ServiceError::Json(_))));
    }
}
