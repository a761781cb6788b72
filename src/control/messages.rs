use serde::{Deserialize, Serialize};

/// Body of Start and Stop requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub root: String,
}

/// Query string of List requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Root filter; accepted but every root is listed
    pub root: Option<String>,
}
