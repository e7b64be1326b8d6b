//! HTTP client for the crawler server's word and article endpoints

use crate::constants::*;
use crate::settings::Settings;
use crate::types::{Backend, SearchRequest, SearchResult, WordFrequency};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Cheap to clone; the inner `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    backend: Backend,
    recent_days: u32,
    article_limit: u32,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .user_agent(format!("word-cloud-explorer/{}", APP_VERSION))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.server_url.trim().trim_end_matches('/').to_string(),
            backend: settings.backend,
            recent_days: settings.recent_days,
            article_limit: settings.article_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn top_words_url(&self, category: &str) -> String {
        let encoded = urlencoding::encode(category);
        match self.backend {
            Backend::Classic => format!("{}{}/{}", self.base_url, TOP_WORDS_PATH, encoded),
            Backend::NewsApi => format!(
                "{}{}?q={}&days={}",
                self.base_url, API_TOP_WORDS_PATH, encoded, self.recent_days
            ),
        }
    }

    pub fn search_url(&self, word: &str) -> String {
        match self.backend {
            Backend::Classic => format!("{}{}", self.base_url, SEARCH_PATH),
            Backend::NewsApi => format!(
                "{}{}?q={}&limit={}",
                self.base_url,
                API_ARTICLES_PATH,
                urlencoding::encode(word),
                self.article_limit
            ),
        }
    }

    /// Fetch the top words for a category, in the order the server ranked them.
    pub async fn top_words(&self, category: &str) -> Result<Vec<WordFrequency>, ApiError> {
        let url = self.top_words_url(category);
        debug!(url = %url, "Fetching top words");
        self.fetch_json(self.http.get(&url), &url).await
    }

    /// Search articles mentioning `word`. The term is sent as-is, empty included.
    pub async fn search(&self, word: &str) -> Result<Vec<SearchResult>, ApiError> {
        let url = self.search_url(word);
        debug!(url = %url, word = %word, "Searching articles");
        let request = match self.backend {
            Backend::Classic => self.http.post(&url).json(&SearchRequest { word }),
            Backend::NewsApi => self.http.get(&url),
        };
        self.fetch_json(request, &url).await
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        debug!(status = %status, bytes = bytes.len(), "Response received");
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn client_for(base_url: &str, backend: Backend) -> ApiClient {
        let settings = Settings {
            server_url: base_url.to_string(),
            backend,
            ..Settings::default()
        };
        ApiClient::new(&settings).unwrap()
    }

    /// Serve a single canned HTTP response; the join handle yields the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{}", addr), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_top_words_url_percent_encodes_category() {
        let client = client_for("http://localhost:5000/", Backend::Classic);
        assert_eq!(
            client.top_words_url("IT/과학"),
            "http://localhost:5000/get_top_words/IT%2F%EA%B3%BC%ED%95%99"
        );
        assert_eq!(
            client.top_words_url("생활 문화"),
            "http://localhost:5000/get_top_words/%EC%83%9D%ED%99%9C%20%EB%AC%B8%ED%99%94"
        );
    }

    #[test]
    fn test_news_api_urls() {
        let client = client_for("http://localhost:8000", Backend::NewsApi);
        assert_eq!(
            client.top_words_url("ai"),
            "http://localhost:8000/api/topwords?q=ai&days=3"
        );
        assert_eq!(
            client.search_url("반도체 칩"),
            "http://localhost:8000/api/articles?q=%EB%B0%98%EB%8F%84%EC%B2%B4%20%EC%B9%A9&limit=20"
        );
    }

    #[test]
    fn test_classic_search_url_ignores_word() {
        let client = client_for("http://localhost:5000", Backend::Classic);
        assert_eq!(client.search_url("anything"), "http://localhost:5000/search");
    }

    #[tokio::test]
    async fn test_top_words_round_trip() {
        let (base, server) = serve_once("200 OK", r#"[["stock",12],["market",9]]"#).await;
        let client = client_for(&base, Backend::Classic);

        let words = client.top_words("news").await.unwrap();
        assert_eq!(
            words,
            vec![WordFrequency::new("stock", 12.0), WordFrequency::new("market", 9.0)]
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /get_top_words/news HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_search_posts_json_body() {
        let (base, server) = serve_once("200 OK", r#"[{"title":"A","link":"http://x"}]"#).await;
        let client = client_for(&base, Backend::Classic);

        let results = client.search("election").await.unwrap();
        assert_eq!(
            results,
            vec![SearchResult {
                title: "A".into(),
                link: "http://x".into()
            }]
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /search HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"word":"election"}"#));
    }

    #[tokio::test]
    async fn test_empty_search_term_is_sent() {
        let (base, server) = serve_once("200 OK", "[]").await;
        let client = client_for(&base, Backend::Classic);

        assert!(client.search("").await.unwrap().is_empty());
        assert!(server.await.unwrap().ends_with(r#"{"word":""}"#));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let (base, server) = serve_once("500 Internal Server Error", "oops").await;
        let client = client_for(&base, Backend::Classic);

        let err = client.top_words("news").await.unwrap_err();
        match err {
            ApiError::Status { status, url } => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert!(url.ends_with("/get_top_words/news"));
            }
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decode_error() {
        let (base, server) = serve_once("200 OK", r#"{"not":"a list"}"#).await;
        let client = client_for(&base, Backend::Classic);

        let err = client.top_words("news").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        server.await.unwrap();
    }
}
