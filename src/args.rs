use clap::{Args as ClapArgs, Parser, Subcommand};
use legacy_leads::places::SearchQuery;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "legacy-leads")]
#[command(about = "Find local businesses with dated websites")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (overrides config and LEGACY_LEADS_BIND)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Score a single website
    Analyze {
        /// Website URL; https:// is assumed without a scheme
        url: String,
    },

    /// Search for nearby independent businesses
    Search(LocationArgs),

    /// Search, then score every business website
    Prospect {
        #[command(flatten)]
        location: LocationArgs,

        /// Number of websites scored concurrently (defaults to max_concurrency)
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct LocationArgs {
    /// Latitude of the search center
    #[arg(long, allow_negative_numbers = true, required_unless_present = "page_token")]
    pub lat: Option<f64>,

    /// Longitude of the search center
    #[arg(long, allow_negative_numbers = true, required_unless_present = "page_token")]
    pub lng: Option<f64>,

    /// Search radius in miles
    #[arg(short, long, default_value_t = 5.0)]
    pub radius: f64,

    /// Continuation token from a previous search
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub page_token: Option<String>,
}

impl LocationArgs {
    /// Convert from CLI arguments to a search query
    pub fn to_query(&self) -> Option<SearchQuery> {
        if let Some(token) = &self.page_token {
            return Some(SearchQuery::Continue {
                token: token.clone(),
            });
        }
        Some(SearchQuery::Nearby {
            lat: self.lat?,
            lng: self.lng?,
            radius_miles: self.radius,
        })
    }
}
