//! Google Places web service client and wire types.

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::time::Duration;

/// Miles to meters, as the provider expects radii in meters
pub const METERS_PER_MILE: f64 = 1609.34;

/// Fields requested from the details endpoint
const DETAIL_FIELDS: &str = "name,formatted_address,website,formatted_phone_number,types";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// A place as returned by nearby search or details
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceRecord {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub types: Option<Vec<String>>,
}

impl PlaceRecord {
    /// Overlay detail fields on top of this summary record
    pub fn merge(self, details: PlaceRecord) -> PlaceRecord {
        PlaceRecord {
            place_id: details.place_id.or(self.place_id),
            name: details.name.or(self.name),
            vicinity: details.vicinity.or(self.vicinity),
            formatted_address: details.formatted_address.or(self.formatted_address),
            formatted_phone_number: details
                .formatted_phone_number
                .or(self.formatted_phone_number),
            international_phone_number: details
                .international_phone_number
                .or(self.international_phone_number),
            website: details.website.or(self.website),
            types: details.types.or(self.types),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceRecord>,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

impl NearbySearchResponse {
    /// Only `OK` and `ZERO_RESULTS` are usable answers
    pub fn check_status(&self) -> AppResult<()> {
        if self.status == STATUS_OK || self.status == STATUS_ZERO_RESULTS {
            return Ok(());
        }
        Err(AppError::Upstream(format!(
            "Google API search responded with status: {}. Error: {}",
            self.status,
            self.error_message.as_deref().unwrap_or("")
        )))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub status: String,
    pub result: Option<PlaceRecord>,
}

/// Client for the nearby-search and place-details endpoints
#[derive(Clone)]
pub struct GooglePlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search around a point; `radius_meters` is passed through as-is
    pub async fn nearby(
        &self,
        lat: f64,
        lng: f64,
        radius_meters: f64,
        keyword: &str,
    ) -> AppResult<NearbySearchResponse> {
        let location = format!("{lat},{lng}");
        let radius = radius_meters.to_string();
        ::log::debug!("Nearby search at {} within {}m", location, radius);

        let response = self
            .http
            .get(self.endpoint("nearbysearch"))
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("keyword", keyword),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json::<NearbySearchResponse>()
            .await?;
        Ok(response)
    }

    /// Fetch the page after the one that issued `token`
    pub async fn next_page(&self, token: &str) -> AppResult<NearbySearchResponse> {
        ::log::debug!("Fetching next page of nearby results");

        let response = self
            .http
            .get(self.endpoint("nearbysearch"))
            .query(&[("pagetoken", token), ("key", self.api_key.as_str())])
            .send()
            .await?
            .json::<NearbySearchResponse>()
            .await?;
        Ok(response)
    }

    /// Look up extended fields for one place
    pub async fn details(&self, place_id: &str) -> AppResult<DetailsResponse> {
        let response = self
            .http
            .get(self.endpoint("details"))
            .query(&[
                ("place_id", place_id),
                ("fields", DETAIL_FIELDS),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json::<DetailsResponse>()
            .await?;
        Ok(response)
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}/json", self.base_url, name)
    }
}
