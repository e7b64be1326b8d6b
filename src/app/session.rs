//! Request/response/render state, independent of egui
//!
//! Every request gets a sequence number. Only the response matching the
//! latest number of its kind is rendered, so a slow reply for an old
//! category can never overwrite a newer one.

use super::views::{LinkList, WordList};
use crate::api::ApiError;
use crate::cloud::{LayoutConfig, TextMetrics, WordCloud};
use crate::types::{SearchResult, WordFrequency};
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

/// Sent by background request tasks back to the UI thread
#[derive(Debug)]
pub enum AppEvent {
    TopWords {
        seq: u64,
        category: String,
        result: Result<Vec<WordFrequency>, ApiError>,
    },
    Search {
        seq: u64,
        word: String,
        result: Result<Vec<SearchResult>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Loading(String),
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    Stale,
    Failed(String),
}

pub struct Session {
    pub word_list: WordList,
    pub cloud: WordCloud,
    pub links: LinkList,
    /// Category whose words are on screen. Only a successful load changes it.
    pub active_category: Option<String>,
    /// Category requested but not answered yet
    pub pending_category: Option<String>,
    pub last_search: Option<String>,
    pub category_status: Status,
    pub search_status: Status,
    pub loaded_at: Option<DateTime<Local>>,
    words: Vec<WordFrequency>,
    category_seq: u64,
    search_seq: u64,
    category_pending: bool,
    search_pending: bool,
}

impl Session {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            word_list: WordList::default(),
            cloud: WordCloud::new(config),
            links: LinkList::default(),
            active_category: None,
            pending_category: None,
            last_search: None,
            category_status: Status::Idle,
            search_status: Status::Idle,
            loaded_at: None,
            words: Vec::new(),
            category_seq: 0,
            search_seq: 0,
            category_pending: false,
            search_pending: false,
        }
    }

    pub fn begin_category(&mut self, category: &str) -> u64 {
        self.category_seq += 1;
        self.category_pending = true;
        self.pending_category = Some(category.to_string());
        self.category_status = Status::Loading(format!("Loading {}…", category));
        self.category_seq
    }

    pub fn begin_search(&mut self, word: &str) -> u64 {
        self.search_seq += 1;
        self.search_pending = true;
        self.last_search = Some(word.to_string());
        self.search_status = Status::Loading(format!("Searching \"{}\"…", word));
        self.search_seq
    }

    pub fn is_loading_category(&self) -> bool {
        self.category_pending
    }

    pub fn is_searching(&self) -> bool {
        self.search_pending
    }

    pub fn apply(&mut self, event: AppEvent, metrics: &dyn TextMetrics) -> Outcome {
        match event {
            AppEvent::TopWords {
                seq,
                category,
                result,
            } => {
                if seq != self.category_seq {
                    debug!(seq, latest = self.category_seq, category = %category, "Dropping stale top words");
                    return Outcome::Stale;
                }
                self.category_pending = false;
                self.pending_category = None;
                match result {
                    Ok(words) => {
                        info!(category = %category, count = words.len(), "Top words loaded");
                        self.word_list.render(&words);
                        self.cloud.render(&words, metrics);
                        self.words = words;
                        self.loaded_at = Some(Local::now());
                        self.category_status = Status::Ready(format!(
                            "{} words for {}",
                            self.word_list.len(),
                            category
                        ));
                        self.active_category = Some(category);
                        Outcome::Applied
                    }
                    Err(e) => {
                        warn!(category = %category, error = %e, "Failed to load top words");
                        let msg = format!("Could not load {}: {}", category, e);
                        self.category_status = Status::Failed(msg.clone());
                        Outcome::Failed(msg)
                    }
                }
            }
            AppEvent::Search { seq, word, result } => {
                if seq != self.search_seq {
                    debug!(seq, latest = self.search_seq, word = %word, "Dropping stale search results");
                    return Outcome::Stale;
                }
                self.search_pending = false;
                match result {
                    Ok(results) => {
                        info!(word = %word, count = results.len(), "Search results received");
                        self.links.render(&results);
                        self.search_status =
                            Status::Ready(format!("{} articles for \"{}\"", self.links.len(), word));
                        Outcome::Applied
                    }
                    Err(e) => {
                        warn!(word = %word, error = %e, "Search failed");
                        let msg = format!("Search for \"{}\" failed: {}", word, e);
                        self.search_status = Status::Failed(msg.clone());
                        Outcome::Failed(msg)
                    }
                }
            }
        }
    }

    /// Lay the current words out again, e.g. after the canvas settings changed
    pub fn relayout(&mut self, config: LayoutConfig, metrics: &dyn TextMetrics) {
        self.cloud.set_config(config);
        if self.words.is_empty() {
            self.cloud.clear();
        } else {
            self.cloud.render(&self.words, metrics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::ApproxMetrics;

    fn words(pairs: &[(&str, f64)]) -> Vec<WordFrequency> {
        pairs.iter().map(|(w, c)| WordFrequency::new(*w, *c)).collect()
    }

    fn top_words(seq: u64, category: &str, pairs: &[(&str, f64)]) -> AppEvent {
        AppEvent::TopWords {
            seq,
            category: category.into(),
            result: Ok(words(pairs)),
        }
    }

    fn decode_error() -> ApiError {
        ApiError::Decode(serde_json::from_str::<Vec<WordFrequency>>("{").unwrap_err())
    }

    fn list_texts(session: &Session) -> Vec<&str> {
        session.word_list.items().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_news_category_renders_list_in_order() {
        let mut session = Session::new(LayoutConfig::default());
        let seq = session.begin_category("news");
        assert!(session.is_loading_category());

        let outcome = session.apply(
            top_words(seq, "news", &[("stock", 12.0), ("market", 9.0)]),
            &ApproxMetrics,
        );

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(list_texts(&session), vec!["stock", "market"]);
        assert_eq!(session.cloud.layout().words.len(), 2);
        assert!(!session.is_loading_category());
        assert!(session.loaded_at.is_some());
    }

    #[test]
    fn test_reload_replaces_list_and_cloud() {
        let mut session = Session::new(LayoutConfig::default());
        let seq = session.begin_category("news");
        session.apply(top_words(seq, "news", &[("stock", 12.0), ("market", 9.0)]), &ApproxMetrics);

        let seq = session.begin_category("news");
        session.apply(top_words(seq, "news", &[("stock", 12.0), ("market", 9.0)]), &ApproxMetrics);

        assert_eq!(list_texts(&session), vec!["stock", "market"]);
        assert_eq!(session.cloud.layout().words.len(), 2);

        let seq = session.begin_category("세계");
        session.apply(top_words(seq, "세계", &[("election", 7.0)]), &ApproxMetrics);
        assert_eq!(list_texts(&session), vec!["election"]);
        let cloud: Vec<_> = session.cloud.layout().words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(cloud, vec!["election"]);
    }

    #[test]
    fn test_stale_category_response_is_ignored() {
        let mut session = Session::new(LayoutConfig::default());
        let old = session.begin_category("경제");
        let new = session.begin_category("정치");

        let outcome = session.apply(top_words(new, "정치", &[("국회", 10.0)]), &ApproxMetrics);
        assert_eq!(outcome, Outcome::Applied);

        let outcome = session.apply(top_words(old, "경제", &[("금리", 30.0)]), &ApproxMetrics);
        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(list_texts(&session), vec!["국회"]);
        assert_eq!(session.active_category.as_deref(), Some("정치"));
    }

    #[test]
    fn test_failed_load_keeps_previous_content() {
        let mut session = Session::new(LayoutConfig::default());
        let seq = session.begin_category("news");
        session.apply(top_words(seq, "news", &[("stock", 12.0)]), &ApproxMetrics);

        let seq = session.begin_category("sports");
        let outcome = session.apply(
            AppEvent::TopWords {
                seq,
                category: "sports".into(),
                result: Err(decode_error()),
            },
            &ApproxMetrics,
        );

        assert!(matches!(outcome, Outcome::Failed(ref msg) if msg.contains("sports")));
        assert!(matches!(session.category_status, Status::Failed(_)));
        assert_eq!(list_texts(&session), vec!["stock"]);
        assert_eq!(session.cloud.layout().words.len(), 1);
        assert!(!session.is_loading_category());
        assert_eq!(session.active_category.as_deref(), Some("news"));
        assert_eq!(session.pending_category, None);
    }

    #[test]
    fn test_category_becomes_active_only_when_loaded() {
        let mut session = Session::new(LayoutConfig::default());
        let seq = session.begin_category("정치");
        assert_eq!(session.active_category, None);
        assert_eq!(session.pending_category.as_deref(), Some("정치"));

        session.apply(top_words(seq, "정치", &[("국회", 10.0)]), &ApproxMetrics);
        assert_eq!(session.active_category.as_deref(), Some("정치"));
        assert_eq!(session.pending_category, None);
    }

    #[test]
    fn test_search_result_leaves_category_status_loading() {
        let mut session = Session::new(LayoutConfig::default());
        let category_seq = session.begin_category("경제");
        let search_seq = session.begin_search("금리");

        session.apply(
            AppEvent::Search { seq: search_seq, word: "금리".into(), result: Ok(Vec::new()) },
            &ApproxMetrics,
        );
        assert!(matches!(session.category_status, Status::Loading(_)));
        assert!(matches!(session.search_status, Status::Ready(_)));
        assert!(session.is_loading_category());

        session.apply(top_words(category_seq, "경제", &[("금리", 9.0)]), &ApproxMetrics);
        assert!(matches!(session.category_status, Status::Ready(_)));
        assert!(matches!(session.search_status, Status::Ready(_)));
    }

    #[test]
    fn test_election_search_renders_one_link() {
        let mut session = Session::new(LayoutConfig::default());
        let seq = session.begin_search("election");
        let outcome = session.apply(
            AppEvent::Search {
                seq,
                word: "election".into(),
                result: Ok(vec![SearchResult {
                    title: "A".into(),
                    link: "http://x".into(),
                }]),
            },
            &ApproxMetrics,
        );

        assert_eq!(outcome, Outcome::Applied);
        let entries = session.links.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].href, "http://x");
        assert_eq!(entries[0].text, "A");
        assert!(!session.is_searching());
    }

    #[test]
    fn test_stale_search_is_ignored() {
        let mut session = Session::new(LayoutConfig::default());
        let old = session.begin_search("ai");
        let new = session.begin_search("반도체");

        let result = |title: &str| {
            Ok(vec![SearchResult {
                title: title.into(),
                link: format!("http://news.test/{}", title),
            }])
        };
        session.apply(AppEvent::Search { seq: new, word: "반도체".into(), result: result("new") }, &ApproxMetrics);
        let outcome =
            session.apply(AppEvent::Search { seq: old, word: "ai".into(), result: result("old") }, &ApproxMetrics);

        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(session.links.entries()[0].text, "new");
    }

    #[test]
    fn test_search_does_not_touch_word_list() {
        let mut session = Session::new(LayoutConfig::default());
        let seq = session.begin_category("news");
        session.apply(top_words(seq, "news", &[("stock", 12.0)]), &ApproxMetrics);

        let seq = session.begin_search("stock");
        session.apply(
            AppEvent::Search { seq, word: "stock".into(), result: Ok(Vec::new()) },
            &ApproxMetrics,
        );
        assert_eq!(list_texts(&session), vec!["stock"]);
        assert!(session.links.is_empty());
    }

    #[test]
    fn test_relayout_uses_new_config() {
        let mut session = Session::new(LayoutConfig::default());
        let seq = session.begin_category("news");
        session.apply(top_words(seq, "news", &[("stock", 12.0)]), &ApproxMetrics);

        let config = LayoutConfig {
            size_multiplier: 3.0,
            ..LayoutConfig::default()
        };
        session.relayout(config, &ApproxMetrics);
        assert_eq!(session.cloud.layout().words[0].size, 36.0);
    }
}
