//! Places aggregation: nearby search, chain exclusion, detail enrichment.

pub mod provider;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::filter::ChainFilter;
use crate::results::{Business, BusinessPage};
use futures::future::join_all;
use provider::{GooglePlacesClient, METERS_PER_MILE, PlaceRecord, STATUS_OK};
use serde::Deserialize;
use tokio::sync::Semaphore;

/// Notice returned when no provider credential is configured
pub const MOCK_NOTICE: &str =
    "Running in mock mode. Add GOOGLE_PLACES_API_KEY to .env to fetch real data.";

/// Type tags too generic to describe a business
const GENERIC_TYPES: &[&str] = &["establishment", "point_of_interest"];

/// Raw query parameters of the businesses endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    /// Radius in miles
    pub radius: Option<String>,
    #[serde(rename = "pageToken")]
    pub page_token: Option<String>,
}

/// A validated search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    Nearby {
        lat: f64,
        lng: f64,
        radius_miles: f64,
    },
    Continue {
        token: String,
    },
}

impl SearchQuery {
    /// A continuation token wins over coordinates; otherwise all three coordinates are required
    pub fn from_params(params: &SearchParams) -> AppResult<Self> {
        if let Some(token) = non_empty(params.page_token.as_deref()) {
            return Ok(SearchQuery::Continue {
                token: token.to_string(),
            });
        }

        let (Some(lat), Some(lng), Some(radius)) = (
            non_empty(params.lat.as_deref()),
            non_empty(params.lng.as_deref()),
            non_empty(params.radius.as_deref()),
        ) else {
            return Err(AppError::Validation(
                "Missing required parameters (lat, lng, radius)".to_string(),
            ));
        };

        Ok(SearchQuery::Nearby {
            lat: parse_number("lat", lat)?,
            lng: parse_number("lng", lng)?,
            radius_miles: parse_number("radius", radius)?,
        })
    }
}

fn parse_number(name: &str, value: &str) -> AppResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::Validation(format!("Invalid value for {name}: {value}")))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Aggregates nearby independent businesses from the places provider
#[derive(Clone)]
pub struct PlacesAggregator {
    client: Option<GooglePlacesClient>,
    chains: ChainFilter,
    keyword: String,
    concurrency: usize,
    result_limit: Option<usize>,
}

impl PlacesAggregator {
    pub fn from_config(config: &ServerConfig) -> Self {
        let client = config
            .api_key()
            .map(|key| GooglePlacesClient::new(&config.places_base_url, key));
        if client.is_none() {
            ::log::warn!("No places API key configured, aggregator runs in mock mode");
        }

        Self {
            client,
            chains: ChainFilter::new(&config.extra_chains),
            keyword: config.search_keyword.clone(),
            concurrency: config.concurrency(),
            result_limit: config.result_limit,
        }
    }

    /// Whether the aggregator answers without contacting the provider
    pub fn is_mock(&self) -> bool {
        self.client.is_none()
    }

    /// Fixed payload served without a provider credential
    pub fn mock_page() -> BusinessPage {
        BusinessPage {
            businesses: Vec::new(),
            next_page_token: None,
            notice: Some(MOCK_NOTICE.to_string()),
        }
    }

    /// Validate raw parameters and search. Mock mode short-circuits before validation.
    pub async fn search_params(&self, params: &SearchParams) -> AppResult<BusinessPage> {
        if self.is_mock() {
            return Ok(Self::mock_page());
        }
        let query = SearchQuery::from_params(params)?;
        self.search(&query).await
    }

    /// Run one search and return normalized, chain-free businesses
    pub async fn search(&self, query: &SearchQuery) -> AppResult<BusinessPage> {
        let Some(client) = &self.client else {
            return Ok(Self::mock_page());
        };

        let response = match query {
            SearchQuery::Continue { token } => client.next_page(token).await?,
            SearchQuery::Nearby {
                lat,
                lng,
                radius_miles,
            } => {
                let radius_meters = radius_miles * METERS_PER_MILE;
                client
                    .nearby(*lat, *lng, radius_meters, &self.keyword)
                    .await?
            }
        };
        response.check_status()?;
        ::log::info!(
            "Provider returned {} places (status {})",
            response.results.len(),
            response.status
        );

        let mut candidates = self.exclude_chains(response.results);
        if let Some(limit) = self.result_limit {
            candidates.truncate(limit);
        }

        // Detail names override summary names, so chains are checked again after merging
        let businesses = self
            .enrich_all(client, candidates)
            .await
            .into_iter()
            .filter(|place| !self.is_chain_record(place))
            .filter_map(to_business)
            .collect::<Vec<_>>();

        Ok(BusinessPage::new(businesses, response.next_page_token))
    }

    /// Drop places without an identifier and places belonging to a chain
    pub fn exclude_chains(&self, places: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
        places
            .into_iter()
            .filter(|place| {
                non_empty(place.place_id.as_deref()).is_some() && !self.is_chain_record(place)
            })
            .collect()
    }

    fn is_chain_record(&self, place: &PlaceRecord) -> bool {
        let name = place.name.as_deref().unwrap_or_default();
        let is_chain = self.chains.is_chain(name);
        if is_chain {
            ::log::debug!("Excluding chain business: {}", name);
        }
        is_chain
    }

    /// Concurrent detail lookups, bounded by the configured concurrency, in input order
    async fn enrich_all(
        &self,
        client: &GooglePlacesClient,
        places: Vec<PlaceRecord>,
    ) -> Vec<PlaceRecord> {
        let semaphore = Semaphore::new(self.concurrency);
        let semaphore = &semaphore;

        let lookups = places.into_iter().map(|place| async move {
            let _permit = semaphore.acquire().await.ok();
            enrich(client, place).await
        });

        join_all(lookups).await
    }
}

/// Merge detail fields into a place; any failure keeps the summary fields
async fn enrich(client: &GooglePlacesClient, place: PlaceRecord) -> PlaceRecord {
    let Some(place_id) = place.place_id.clone() else {
        return place;
    };

    match client.details(&place_id).await {
        Ok(details) if details.status == STATUS_OK => match details.result {
            Some(result) => place.merge(result),
            None => place,
        },
        Ok(details) => {
            ::log::debug!(
                "Details for {} returned status {}, using summary",
                place_id,
                details.status
            );
            place
        }
        Err(e) => {
            ::log::warn!("Details lookup for {} failed: {}", place_id, e);
            place
        }
    }
}

/// Normalize a provider record into the client-facing shape
pub fn to_business(place: PlaceRecord) -> Option<Business> {
    let place_id = non_empty(place.place_id.as_deref())?;

    let category = match place.types.as_deref() {
        Some(types) if !types.is_empty() => types
            .iter()
            .find(|t| !GENERIC_TYPES.contains(&t.as_str()))
            .unwrap_or(&types[0])
            .clone(),
        _ => "Business".to_string(),
    };

    Some(Business {
        id: format!("google-{place_id}"),
        name: first_of(&[&place.name]).unwrap_or_else(|| "Unknown Business".to_string()),
        address: first_of(&[&place.formatted_address, &place.vicinity])
            .unwrap_or_else(|| "No Address Provided".to_string()),
        phone: first_of(&[
            &place.formatted_phone_number,
            &place.international_phone_number,
        ])
        .unwrap_or_else(|| "No Phone".to_string()),
        website: first_of(&[&place.website]),
        category,
    })
}

fn first_of(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .find_map(|c| non_empty(c.as_deref()))
        .map(str::to_string)
}
