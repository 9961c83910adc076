/// Well-known chain brands, as lowercase name fragments
pub const CHAIN_BUSINESSES: &[&str] = &[
    "starbucks",
    "mcdonald",
    "subway",
    "burger king",
    "wendy",
    "taco bell",
    "kfc",
    "pizza hut",
    "domino",
    "dunkin",
    "fedex",
    "ups",
    "costco",
    "walmart",
    "target",
    "chipotle",
    "panera",
    "papa john",
    "cvs",
    "walgreens",
    "home depot",
    "lowes",
    "best buy",
    "applebee",
    "chili's",
    "olive garden",
    "red lobster",
    "dairy queen",
    "arby",
    "sonic",
    "tim hortons",
];

/// Filter that excludes chain businesses by name.
///
/// Matching is plain case-insensitive substring containment, so "Groups & Co"
/// is caught by "ups". That looseness is the intended behavior.
#[derive(Debug, Clone)]
pub struct ChainFilter {
    denylist: Vec<String>,
}

impl Default for ChainFilter {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl ChainFilter {
    /// Create a filter from the built-in list plus any extra fragments
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut denylist: Vec<String> = CHAIN_BUSINESSES.iter().map(|c| c.to_string()).collect();
        for chain in extra {
            let chain = chain.as_ref().trim().to_lowercase();
            if !chain.is_empty() && !denylist.contains(&chain) {
                denylist.push(chain);
            }
        }
        Self { denylist }
    }

    /// Determine if a business name belongs to a known chain
    pub fn is_chain(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.denylist.iter().any(|chain| name.contains(chain.as_str()))
    }
}
