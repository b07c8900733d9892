use serde::{Deserialize, Serialize};

/// Listing projection of a row in `apps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSummary {
    pub id: i64,
    pub name: String,
}

/// Full projection of a row in `apps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDetail {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub language: String,
    pub framework: String,
}

impl AppDetail {
    #[must_use]
    pub fn summary(&self) -> AppSummary {
        AppSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}
