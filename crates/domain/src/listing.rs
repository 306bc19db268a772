use std::fmt;

/// Outcome of matching one query name against the blocklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingDecision {
    Listed,
    NotListed,
    Malformed,
}

impl ListingDecision {
    pub fn from_listed(listed: bool) -> Self {
        if listed {
            ListingDecision::Listed
        } else {
            ListingDecision::NotListed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingDecision::Listed => "LISTED",
            ListingDecision::NotListed => "NOT_LISTED",
            ListingDecision::Malformed => "MALFORMED",
        }
    }
}

impl fmt::Display for ListingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
