use crate::analyzer::WebsiteAnalyzer;
use crate::error::AppResult;
use crate::places::{PlacesAggregator, SearchQuery};
use crate::results::{BusinessPage, Lead};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

/// Searches once, then scores every business website and yields merged leads as they finish.
///
/// The search itself runs before this returns, so provider errors surface here;
/// scoring failures only drop the analysis of the affected lead.
///
/// # Arguments
///
/// * `concurrency` - Maximum number of websites scored at the same time
pub async fn prospect(
    aggregator: &PlacesAggregator,
    analyzer: WebsiteAnalyzer,
    query: &SearchQuery,
    concurrency: usize,
) -> AppResult<(mpsc::Receiver<Lead>, Option<String>)> {
    let page = aggregator.search(query).await?;
    let next_page_token = page.next_page_token.clone();
    Ok((spawn_scoring(page, analyzer, concurrency), next_page_token))
}

/// Spawns one scoring task per business and returns the receiving end
pub fn spawn_scoring(
    page: BusinessPage,
    analyzer: WebsiteAnalyzer,
    concurrency: usize,
) -> mpsc::Receiver<Lead> {
    let (lead_tx, lead_rx) = mpsc::channel::<Lead>(page.businesses.len().max(1));
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    ::log::info!(
        "Scoring websites of {} businesses with concurrency {}",
        page.businesses.len(),
        concurrency
    );

    for business in page.businesses {
        let lead_tx = lead_tx.clone();
        let analyzer = analyzer.clone();
        let semaphore = Arc::clone(&semaphore);

        tokio::spawn(async move {
            let analysis = match business.website.as_deref() {
                Some(website) => {
                    let _permit = semaphore.acquire().await.ok();
                    match analyzer.analyze(website).await {
                        Ok(result) => Some(result),
                        Err(e) => {
                            ::log::error!("Failed to analyze {}: {}", website, e);
                            None
                        }
                    }
                }
                None => None,
            };

            if let Err(e) = lead_tx.send(Lead { business, analysis }).await {
                ::log::warn!("Lead receiver dropped: {}", e);
            }
        });
    }

    // Channel closes once every task has sent its lead
    drop(lead_tx);

    lead_rx
}
