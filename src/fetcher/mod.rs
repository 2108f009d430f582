use std::time::Duration;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::HttpClientConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch {}", status_text(.0))]
    Status(StatusCode),
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

fn status_text(status: &StatusCode) -> &str {
    status.canonical_reason().unwrap_or(status.as_str())
}

/// Single-shot page downloader. Cloning shares the underlying client.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &HttpClientConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(0);

        if let Some(secs) = config.request_timeout_secs.filter(|secs| *secs > 0) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn fetch_text(&self, url: &Url) -> Result<String, FetchError> {
        info!(url = %url, "fetching page");

        let response = match self.client.get(url.clone()).send().await {
            Ok(resp) => resp,
            Err(err) => {
                warn!(url = %url, error = %err, "request failed");
                return Err(err.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "unexpected status");
            return Err(FetchError::Status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let bytes = response.bytes().await?;
        let (text, encoding) = decode_body(&bytes, content_type.as_deref(), url.host_str());

        debug!(
            url = %url,
            status = status.as_u16(),
            bytes = bytes.len(),
            encoding = encoding.name(),
            "page fetched"
        );

        Ok(text)
    }
}

/// Decodes a response body using the declared charset, falling back to
/// sniffing the bytes. A byte-order mark always wins.
fn decode_body(
    bytes: &[u8],
    content_type: Option<&str>,
    host: Option<&str>,
) -> (String, &'static Encoding) {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .unwrap_or_else(|| sniff_encoding(bytes, host));

    let (text, used, _had_errors) = encoding.decode(bytes);
    (text.into_owned(), used)
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches('"').as_bytes())
    })
}

fn sniff_encoding(bytes: &[u8], host: Option<&str>) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let tld = host
        .and_then(|host| host.rsplit('.').next())
        .filter(|label| !label.is_empty() && label.is_ascii())
        .map(str::as_bytes);
    detector.guess(tld, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::header, routing::get, Router};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&HttpClientConfig::default()).unwrap()
    }

    #[test]
    fn status_error_uses_reason_phrase() {
        let err = FetchError::Status(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Failed to fetch Not Found");
    }

    #[test]
    fn status_error_without_reason_uses_code() {
        let err = FetchError::Status(StatusCode::from_u16(599).unwrap());
        assert_eq!(err.to_string(), "Failed to fetch 599");
    }

    #[test]
    fn declared_charset_is_honored() {
        let bytes = [b'c', b'a', b'f', 0xE9];
        let (text, encoding) = decode_body(&bytes, Some("text/html; charset=\"ISO-8859-1\""), None);
        assert_eq!(text, "café");
        assert_eq!(encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn missing_charset_is_sniffed() {
        let (text, encoding) = decode_body("héllo wörld".as_bytes(), Some("text/html"), None);
        assert_eq!(text, "héllo wörld");
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn unknown_charset_label_falls_back_to_sniffing() {
        assert!(charset_from_content_type("text/html; charset=klingon").is_none());
        let (text, _) = decode_body(b"plain ascii", Some("text/html; charset=klingon"), None);
        assert_eq!(text, "plain ascii");
    }

    #[tokio::test]
    async fn fetches_successful_page_body() {
        let base = serve(Router::new().route(
            "/page",
            get(|| async { ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], "<p>hi there</p>") }),
        ))
        .await;

        let url = Url::parse(&format!("{base}/page")).unwrap();
        let text = fetcher().fetch_text(&url).await.unwrap();
        assert_eq!(text, "<p>hi there</p>");
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let base = serve(Router::new()).await;

        let url = Url::parse(&format!("{base}/missing")).unwrap();
        let err = fetcher().fetch_text(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::NOT_FOUND)));
        assert!(err.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn connection_refused_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/")).unwrap();
        let err = fetcher().fetch_text(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
