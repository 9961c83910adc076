pub mod analyzer;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod parsers;
pub mod pipeline;
pub mod places;
pub mod results;
pub mod scoring;
pub mod server;

// Re-export commonly used types for convenience
pub use analyzer::WebsiteAnalyzer;
pub use error::{AppError, AppResult};
pub use places::{PlacesAggregator, SearchQuery};
pub use results::{Business, BusinessPage, Category, Lead, ScoreResult};
