//! HTTP holiday feed.

use crate::error::FeedError;
use crate::payload::parse_payload;
use crate::source::HolidaySource;
use async_trait::async_trait;
use infra_config::{RetryConfig, SourceConfig};
use infra_master::HolidayEntry;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Fetches `{year}.json` payloads from a templated URL.
#[derive(Debug, Clone)]
pub struct HttpHolidaySource {
    client: reqwest::Client,
    config: SourceConfig,
    retry: RetryConfig,
}

impl HttpHolidaySource {
    /// Build a source with the configured request timeout.
    pub fn new(config: &SourceConfig, retry: RetryConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("offday/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            retry,
        })
    }

    /// Endpoint URL for `year`.
    pub fn url_for(&self, year: i32) -> String {
        self.config.url_for(year)
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FeedError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl HolidaySource for HttpHolidaySource {
    async fn fetch(&self, year: i32) -> Result<Vec<HolidayEntry>, FeedError> {
        let url = self.url_for(year);
        let mut attempt = 0;

        let body = loop {
            debug!(year, %url, attempt, "requesting holiday data");
            match self.fetch_once(&url).await {
                Ok(body) => break body,
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(year, error = %e, attempt, ?delay, "transient fetch failure, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        };

        let entries = parse_payload(&body)?;
        info!(year, entries = entries.len(), "fetched holiday data");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const NEW_YEAR_2025: &str =
        r#"[{"name": "New Year", "range": ["2025-01-01"], "type": "holiday"}]"#;

    fn fast_retry(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_backoff_ms: 1,
            max_backoff_ms: 5,
            backoff_factor: 2.0,
        }
    }

    /// Serve one canned response per connection, in order, counting requests.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (SourceConfig, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                }
                counter.fetch_add(1, Ordering::SeqCst);

                let reply = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        let config = SourceConfig {
            url_template: format!("http://{}/data/{{year}}.json", addr),
            timeout_secs: 5,
            ..SourceConfig::default()
        };
        (config, requests)
    }

    #[test]
    fn test_url_for_uses_template() {
        let config = SourceConfig {
            url_template: "https://holidays.example.test/cn/{year}.json".to_string(),
            ..SourceConfig::default()
        };
        let source = HttpHolidaySource::new(&config, RetryConfig::disabled()).unwrap();
        assert_eq!(
            source.url_for(2019),
            "https://holidays.example.test/cn/2019.json"
        );
    }

    #[test]
    fn test_status_classification() {
        let transient = FeedError::Status {
            status: 503,
            url: String::new(),
        };
        let throttled = FeedError::Status {
            status: 429,
            url: String::new(),
        };
        let forbidden = FeedError::Status {
            status: 403,
            url: String::new(),
        };
        assert!(transient.is_transient());
        assert!(throttled.is_transient());
        assert!(!forbidden.is_transient());
        assert!(!FeedError::NotFound("x".into()).is_transient());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty() {
        // Port 9 on loopback refuses connections on any sane test host.
        let config = SourceConfig {
            url_template: "http://127.0.0.1:9/data/{year}.json".to_string(),
            timeout_secs: 2,
            ..SourceConfig::default()
        };
        let source = HttpHolidaySource::new(&config, RetryConfig::disabled()).unwrap();
        assert!(source.fetch_or_empty(2025).await.is_empty());
    }

    #[tokio::test]
    async fn test_retries_unavailable_and_throttled_responses() {
        let (config, requests) =
            serve(vec![(503, ""), (429, ""), (200, NEW_YEAR_2025)]).await;
        let source = HttpHolidaySource::new(&config, fast_retry(3)).unwrap();

        let entries = source.fetch(2025).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name(), "New Year");
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let (config, requests) = serve(vec![(404, "")]).await;
        let source = HttpHolidaySource::new(&config, fast_retry(3)).unwrap();

        let result = source.fetch(2031).await;
        assert!(matches!(result, Err(FeedError::NotFound(_))));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let (config, requests) = serve(vec![(502, ""), (502, "")]).await;
        let source = HttpHolidaySource::new(&config, fast_retry(1)).unwrap();

        let result = source.fetch(2025).await;
        assert!(matches!(result, Err(FeedError::Status { status: 502, .. })));
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }
}
