use serde::{Deserialize, Serialize};

/// One social message, narrowed to the fields we render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub body: String,
    /// Zero when the source omits like counts.
    pub like_count: u64,
    pub author_username: String,
}

impl PostRecord {
    pub fn new(body: impl Into<String>, like_count: u64, author_username: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            like_count,
            author_username: author_username.into(),
        }
    }
}
