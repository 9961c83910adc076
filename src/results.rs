use serde::{Deserialize, Serialize};

/// Lower bound of the score range
pub const MIN_SCORE: i32 = 0;

/// Upper bound of the score range, also the starting score
pub const MAX_SCORE: i32 = 10;

/// A business as shown to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    /// Provider-derived identifier (`google-<place_id>`)
    pub id: String,

    pub name: String,

    pub address: String,

    pub phone: String,

    /// Website, if the provider knows one
    pub website: Option<String>,

    /// First non-generic provider type tag
    pub category: String,
}

/// One page of aggregated businesses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessPage {
    pub businesses: Vec<Business>,

    /// Opaque continuation token issued by the provider
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,

    /// Set only when running without a provider credential
    #[serde(rename = "_notice", default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl BusinessPage {
    /// Create a page of businesses with an optional continuation token
    pub fn new(businesses: Vec<Business>, next_page_token: Option<String>) -> Self {
        Self {
            businesses,
            next_page_token,
            notice: None,
        }
    }
}

/// Digital-maturity bucket derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Modern,
    Average,
    Legacy,
}

impl Category {
    /// `>= 8` is Modern, `<= 5` is Legacy, everything between is Average
    pub fn from_score(score: i32) -> Self {
        if score >= 8 {
            Category::Modern
        } else if score <= 5 {
            Category::Legacy
        } else {
            Category::Average
        }
    }
}

/// Outcome of scoring a single website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: i32,
    pub category: Category,
    pub insights: Vec<String>,
    pub is_secure: bool,
}

impl ScoreResult {
    /// Result reported when the site could not be fetched on any scheme
    pub fn unreachable() -> Self {
        Self {
            score: MIN_SCORE,
            category: Category::Legacy,
            insights: vec!["Website is unreachable or down".to_string()],
            is_secure: false,
        }
    }
}

/// A business merged with the analysis of its website
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub business: Business,

    /// Absent when the business has no website or scoring failed
    pub analysis: Option<ScoreResult>,
}
