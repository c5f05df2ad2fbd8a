use std::{convert::Infallible, fmt, str::FromStr};

use serde::{de::Deserializer, Deserialize, Serialize, Serializer};

const FALLBACK_ICON: &str = "💰";

/// Spending categories offered when logging an expense.
///
/// Labels that match none of the known categories are kept verbatim in
/// [`Category::Other`] so they survive a save/load cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Shopping,
    Entertainment,
    Living,
    Investment,
    /// Custom label. Records and quick buttons store it through
    /// [`Category::canonical`], so it never holds a label that `parse`
    /// recognises.
    Other(String),
}

impl Category {
    pub const KNOWN: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Living,
        Category::Investment,
    ];

    /// Resolves a stored or user-typed label. Matching is case-insensitive
    /// and accepts the labels written by the browser version of the tracker.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "food" | "飲食" => Category::Food,
            "transport" | "交通" => Category::Transport,
            "shopping" | "購物" => Category::Shopping,
            "entertainment" | "娛樂" => Category::Entertainment,
            "living" | "生活" => Category::Living,
            "investment" | "投資" => Category::Investment,
            _ => Category::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Living => "Living",
            Category::Investment => "Investment",
            Category::Other(label) => label,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "🍽️",
            Category::Transport => "🚗",
            Category::Shopping => "🛒",
            Category::Entertainment => "🎮",
            Category::Living => "🏠",
            Category::Investment => "📈",
            Category::Other(_) => FALLBACK_ICON,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Resolves an [`Category::Other`] whose label names a known category
    /// (or a legacy label) to that category.
    pub fn canonical(self) -> Self {
        match self {
            Category::Other(label) => Category::parse(&label),
            known => known,
        }
    }

    /// Comma-separated labels of the built-in categories.
    pub fn known_labels() -> String {
        Category::KNOWN
            .iter()
            .map(Category::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Category::parse(value))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Category::parse(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_english_and_legacy_labels() {
        assert_eq!(Category::parse("food"), Category::Food);
        assert_eq!(Category::parse(" Transport "), Category::Transport);
        assert_eq!(Category::parse("投資"), Category::Investment);
        assert_eq!(Category::parse("生活"), Category::Living);
    }

    #[test]
    fn unknown_labels_are_preserved() {
        let category = Category::parse("Pets");
        assert_eq!(category, Category::Other("Pets".into()));
        assert_eq!(category.icon(), FALLBACK_ICON);
        assert!(!category.is_known());

        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, "\"Pets\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, category);
    }

    #[test]
    fn other_holding_a_known_label_is_canonicalised() {
        assert_eq!(Category::Other("food".into()).canonical(), Category::Food);
        assert_eq!(Category::Other("交通".into()).canonical(), Category::Transport);
        assert_eq!(
            Category::Other(" Pets ".into()).canonical(),
            Category::Other("Pets".into())
        );
        assert_eq!(Category::Living.canonical(), Category::Living);
    }

    #[test]
    fn known_labels_list_every_builtin() {
        assert_eq!(
            Category::known_labels(),
            "Food, Transport, Shopping, Entertainment, Living, Investment"
        );
        assert_eq!(Category::default(), Category::Food);
    }

    #[test]
    fn known_categories_serialize_as_labels() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"Entertainment\"");
        let legacy: Category = serde_json::from_str("\"購物\"").unwrap();
        assert_eq!(legacy, Category::Shopping);
    }
}
