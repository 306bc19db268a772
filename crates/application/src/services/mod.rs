mod blocklist_matcher;

pub use blocklist_matcher::BlocklistMatcher;
