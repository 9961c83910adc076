use regex::Regex;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use url::Url;

/// Per-attempt timeout applied when nothing else is configured
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("legacy-leads/", env!("CARGO_PKG_VERSION"));

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid scheme pattern"));

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL that was requested on the attempt that succeeded
    pub requested_url: String,
    /// URL after following redirects
    pub final_url: String,
    /// Response body
    pub body: String,
    /// Wall-clock time across all attempts
    pub elapsed: Duration,
}

/// Prefixes `https://` when the URL carries no http(s) scheme
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if SCHEME.is_match(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// The plain-HTTP twin of an HTTPS URL, if it is one
pub fn http_fallback(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    if parsed.scheme() != "https" {
        return None;
    }
    parsed.set_scheme("http").ok()?;
    Some(parsed.to_string())
}

/// HTTP client for target websites
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Create a fetcher whose every attempt is bounded by `timeout`
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Fetches `url`, retrying once over plain HTTP if an HTTPS attempt fails.
    ///
    /// Returns `None` when every attempt failed.
    pub async fn fetch_with_fallback(&self, url: &str) -> Option<FetchedPage> {
        let start = Instant::now();
        let mut target = url.to_string();

        for attempt in 0..2 {
            if attempt > 0 {
                match http_fallback(&target) {
                    Some(fallback) => {
                        ::log::info!("Retrying {} over plain HTTP: {}", target, fallback);
                        target = fallback;
                    }
                    None => break,
                }
            }

            match self.fetch_once(&target).await {
                Ok((final_url, body)) => {
                    let elapsed = start.elapsed();
                    ::log::debug!(
                        "Fetched {} (final {}) in {:.2} seconds",
                        target,
                        final_url,
                        elapsed.as_secs_f64()
                    );
                    return Some(FetchedPage {
                        requested_url: target,
                        final_url,
                        body,
                        elapsed,
                    });
                }
                Err(e) => {
                    ::log::warn!("Failed to fetch {}: {}", target, e);
                }
            }
        }

        ::log::info!("Giving up on unreachable site: {}", url);
        None
    }

    async fn fetch_once(&self, url: &str) -> Result<(String, String), reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().to_string();
        let body = response.text().await?;
        Ok((final_url, body))
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}
