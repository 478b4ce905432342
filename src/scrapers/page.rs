//! Plain HTTP fetcher for arbitrary article pages.
//!
//! Every page is fetched with a single GET and reduced to its `<title>` and
//! the concatenation of all visible text nodes in document order. Nothing is
//! removed besides the content of non-rendered elements (`script`, `style`,
//! `noscript`, `template`), so navigation and footer text are included.

use super::ArticleFetcher;
use crate::errors::FetchError;
use crate::models::ArticleText;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Node, Selector};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use url::Url;

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static selector"));

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP with a per-request timeout and no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    #[cfg(test)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl ArticleFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<ArticleText, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let t0 = Instant::now();
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Downloaded page"
        );

        Ok(extract_article(&body))
    }
}

/// Extract the title and all visible text of an HTML document.
pub fn extract_article(html: &str) -> ArticleText {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let mut body = String::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            body.push_str(text);
        }
    }

    ArticleText { title, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn test_fetcher(timeout: Duration) -> HttpFetcher {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .unwrap();
        HttpFetcher::with_client(client)
    }

    /// Serve a single canned HTTP response on a local port.
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/article")
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn test_extract_title_and_text() {
        let html = "<html><head><title> Market Update </title></head>\
                    <body><nav>Home</nav><p>Stocks rose.</p><footer>Contact</footer></body></html>";
        let article = extract_article(html);
        assert_eq!(article.title, "Market Update");
        assert!(article.body.contains("Home"));
        assert!(article.body.contains("Stocks rose."));
        assert!(article.body.contains("Contact"));
    }

    #[test]
    fn test_extract_skips_script_and_style() {
        let html = "<html><head><style>p { color: red; }</style></head>\
                    <body><p>Visible</p><script>var hidden = 1;</script></body></html>";
        let article = extract_article(html);
        assert!(article.body.contains("Visible"));
        assert!(!article.body.contains("hidden"));
        assert!(!article.body.contains("color"));
    }

    #[test]
    fn test_missing_title_is_empty() {
        let article = extract_article("<p>No title here.</p>");
        assert_eq!(article.title, "");
        assert!(article.body.contains("No title here."));
    }

    #[test]
    fn test_empty_document() {
        let article = extract_article("");
        assert_eq!(article, ArticleText::default());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let body = "<html><head><title>Hello</title></head><body><p>Good news today.</p></body></html>";
        let url = serve_once(http_response("200 OK", body)).await;

        let article = test_fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap();
        assert_eq!(article.title, "Hello");
        assert!(article.body.contains("Good news today."));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let url = serve_once(http_response("404 Not Found", "gone")).await;

        let err = test_fetcher(Duration::from_secs(5)).fetch(&url).await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let err = test_fetcher(Duration::from_secs(5))
            .fetch("not a url")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = test_fetcher(Duration::from_secs(5))
            .fetch(&format!("http://{addr}/"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let err = test_fetcher(Duration::from_millis(200))
            .fetch(&format!("http://{addr}/"))
            .await
            .unwrap_err();
        match err {
            FetchError::Transport { source, .. } => assert!(source.is_timeout()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
