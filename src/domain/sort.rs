use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Comment sort orders understood by the page loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Best,
    Top,
    New,
    Controversial,
    Old,
    Qa,
}

impl SortOption {
    /// Value sent as the `sort` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            SortOption::Best => "confidence",
            SortOption::Top => "top",
            SortOption::New => "new",
            SortOption::Controversial => "controversial",
            SortOption::Old => "old",
            SortOption::Qa => "qa",
        }
    }
}
