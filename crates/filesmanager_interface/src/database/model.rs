use serde::{Deserialize, Serialize};

// Number of documents stored in each collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub users: u64,
    pub files: u64,
}
