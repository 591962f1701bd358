use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of topic categories an article can belong to.
///
/// The serialized tags are the wire values used in config files and in the
/// `category` column of the cache, e.g. `agentic_ai_business`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Breaking,
    AgenticAiDev,
    AgenticAiBusiness,
    Us,
    World,
    Tech,
    Business,
    Deals,
    Sports,
    Entertainment,
    Science,
    Manufacturing,
    LifeSciences,
    Automotive,
    Aviation,
    Ecommerce,
    AgenticAi,
}

impl Category {
    pub const ALL: [Category; 17] = [
        Category::Breaking,
        Category::AgenticAiDev,
        Category::AgenticAiBusiness,
        Category::Us,
        Category::World,
        Category::Tech,
        Category::Business,
        Category::Deals,
        Category::Sports,
        Category::Entertainment,
        Category::Science,
        Category::Manufacturing,
        Category::LifeSciences,
        Category::Automotive,
        Category::Aviation,
        Category::Ecommerce,
        Category::AgenticAi,
    ];

    /// The stable wire tag, as stored in config and in the cache.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breaking => "breaking",
            Category::AgenticAiDev => "agentic_ai_dev",
            Category::AgenticAiBusiness => "agentic_ai_business",
            Category::Us => "us",
            Category::World => "world",
            Category::Tech => "tech",
            Category::Business => "business",
            Category::Deals => "deals",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Science => "science",
            Category::Manufacturing => "manufacturing",
            Category::LifeSciences => "life_sciences",
            Category::Automotive => "automotive",
            Category::Aviation => "aviation",
            Category::Ecommerce => "ecommerce",
            Category::AgenticAi => "agentic_ai",
        }
    }

    /// Human-readable name for display ("life_sciences" -> "Life Sciences").
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown category tag: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!("nonexistent".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
        assert!("Tech".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_tags() {
        let json = serde_json::to_string(&Category::AgenticAiBusiness).unwrap();
        assert_eq!(json, "\"agentic_ai_business\"");

        let parsed: Category = serde_json::from_str("\"life_sciences\"").unwrap();
        assert_eq!(parsed, Category::LifeSciences);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Category::Tech.display_name(), "Tech");
        assert_eq!(Category::LifeSciences.display_name(), "Life Sciences");
        assert_eq!(
            Category::AgenticAiBusiness.display_name(),
            "Agentic Ai Business"
        );
    }
}
