//! Issue categories a user can report.

use serde::{Deserialize, Serialize};

/// Closed set of reportable issue categories.
///
/// The serialized form is the label the complaints API stores in its
/// `type` field, so it must stay in sync with [`Category::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food/Hygiene")]
    FoodHygiene,
    #[serde(rename = "Cleanliness")]
    Cleanliness,
    #[serde(rename = "Water")]
    Water,
    #[serde(rename = "Electricity")]
    Electricity,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in menu order
    pub const ALL: [Category; 5] = [
        Category::FoodHygiene,
        Category::Cleanliness,
        Category::Water,
        Category::Electricity,
        Category::Other,
    ];

    /// Label shown to the user and sent to the complaints API
    pub fn label(&self) -> &'static str {
        match self {
            Self::FoodHygiene => "Food/Hygiene",
            Self::Cleanliness => "Cleanliness",
            Self::Water => "Water",
            Self::Electricity => "Electricity",
            Self::Other => "Other",
        }
    }

    /// Short name used in the "pick a category" menu
    pub fn menu_name(&self) -> &'static str {
        match self {
            Self::FoodHygiene => "Food",
            Self::Cleanliness => "Cleanliness",
            Self::Water => "Water",
            Self::Electricity => "Electricity",
            Self::Other => "Other",
        }
    }

    /// Parse from a label or snake_case name (for CLI flags and fixtures)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food/hygiene" | "food_hygiene" | "food" => Some(Self::FoodHygiene),
            "cleanliness" => Some(Self::Cleanliness),
            "water" => Some(Self::Water),
            "electricity" => Some(Self::Electricity),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Comma-separated menu of all categories, e.g. for clarification prompts
pub fn category_menu() -> String {
    Category::ALL
        .iter()
        .map(|c| c.menu_name())
        .collect::<Vec<_>>()
        .join(", ")
}
