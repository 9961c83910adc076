use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::fetcher::{self, PageFetcher};
use crate::results::ScoreResult;
use crate::scoring::{self, DEFAULT_SLOW_THRESHOLD};
use std::time::Duration;

/// Scores how dated a business website looks
#[derive(Clone)]
pub struct WebsiteAnalyzer {
    fetcher: PageFetcher,
    slow_threshold: Duration,
}

impl WebsiteAnalyzer {
    pub fn new(fetcher: PageFetcher, slow_threshold: Duration) -> Self {
        Self {
            fetcher,
            slow_threshold,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            PageFetcher::new(config.fetch_timeout()),
            config.slow_threshold(),
        )
    }

    /// Fetches and scores a single website.
    ///
    /// An unreachable site is not an error; it yields [`ScoreResult::unreachable`].
    pub async fn analyze(&self, url: &str) -> AppResult<ScoreResult> {
        if url.trim().is_empty() {
            return Err(AppError::Validation("URL is required".to_string()));
        }

        let target = fetcher::normalize_url(url);
        ::log::info!("Analyzing website: {}", target);

        let Some(page) = self.fetcher.fetch_with_fallback(&target).await else {
            return Ok(ScoreResult::unreachable());
        };

        // scraper's document tree is not Send, so keep it off the async task
        let slow_threshold = self.slow_threshold;
        let result = tokio::task::spawn_blocking(move || {
            scoring::score_document(&page.body, &page.final_url, page.elapsed, slow_threshold)
        })
        .await
        .map_err(|e| AppError::Internal(format!("scoring task failed: {e}")))?;

        ::log::info!(
            "Scored {}: {} ({:?})",
            target,
            result.score,
            result.category
        );
        Ok(result)
    }
}

impl Default for WebsiteAnalyzer {
    fn default() -> Self {
        Self::new(PageFetcher::default(), DEFAULT_SLOW_THRESHOLD)
    }
}
