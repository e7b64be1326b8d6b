//! Common types and data structures

use serde::{Deserialize, Serialize};

/// One `[word, count]` pair from the top-words endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f64)", into = "(String, f64)")]
pub struct WordFrequency {
    pub word: String,
    pub count: f64,
}

impl WordFrequency {
    pub fn new(word: impl Into<String>, count: f64) -> Self {
        Self { word: word.into(), count }
    }
}

impl From<(String, f64)> for WordFrequency {
    fn from((word, count): (String, f64)) -> Self {
        Self { word, count }
    }
}

impl From<WordFrequency> for (String, f64) {
    fn from(w: WordFrequency) -> Self {
        (w.word, w.count)
    }
}

/// Article returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
}

/// Body of `POST /search`
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub word: &'a str,
}

/// Which generation of the crawler server we talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// `GET /get_top_words/{category}` and `POST /search`
    #[default]
    Classic,
    /// `GET /api/topwords?q=` and `GET /api/articles?q=`
    NewsApi,
}

impl Backend {
    pub fn label(self) -> &'static str {
        match self {
            Backend::Classic => "Classic",
            Backend::NewsApi => "News API",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_frequency_from_json_pair() {
        let words: Vec<WordFrequency> =
            serde_json::from_str(r#"[["stock",12],["market",9.5]]"#).unwrap();
        assert_eq!(
            words,
            vec![WordFrequency::new("stock", 12.0), WordFrequency::new("market", 9.5)]
        );
    }

    #[test]
    fn test_word_frequency_rejects_objects() {
        let parsed = serde_json::from_str::<Vec<WordFrequency>>(r#"[{"word":"stock"}]"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_search_request_body() {
        let body = serde_json::to_string(&SearchRequest { word: "election" }).unwrap();
        assert_eq!(body, r#"{"word":"election"}"#);
    }

    #[test]
    fn test_backend_serialization() {
        assert_eq!(serde_json::to_string(&Backend::NewsApi).unwrap(), "\"news_api\"");
        let b: Backend = serde_json::from_str("\"classic\"").unwrap();
        assert_eq!(b, Backend::Classic);
    }
}
