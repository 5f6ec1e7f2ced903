/// Category filtering for the card grid
use std::fmt;

use super::data::{Card, Visibility};

/// Sentinel category that matches every card
pub const ALL: &str = "all";

/// The active category filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => card.category == *category,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Filter::All => ALL,
            Filter::Category(category) => category,
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        if value == ALL {
            Filter::All
        } else {
            Filter::Category(value.to_string())
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set every card's visibility from `filter`.
///
/// An unknown category is not an error, it simply hides everything.
pub fn apply_filter(cards: &mut [Card], filter: &Filter) {
    for card in cards.iter_mut() {
        card.visibility = if filter.matches(card) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Indexes of the cards not hidden by the filter, in original order
pub fn visible_indexes(cards: &[Card]) -> Vec<usize> {
    cards
        .iter()
        .filter(|card| card.is_visible())
        .map(|card| card.index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(categories: &[&str]) -> Vec<Card> {
        categories
            .iter()
            .enumerate()
            .map(|(index, category)| Card {
                index,
                category: category.to_string(),
                title: format!("Card {}", index),
                caption: String::new(),
                image_source: format!("/img/{}.jpg", index),
                alt: None,
                visibility: Visibility::Visible,
            })
            .collect()
    }

    #[test]
    fn test_visibility_matches_filter_for_every_filter() {
        let mut cards = cards(&["nature", "city", "nature", "people", "city"]);
        let filters = ["all", "nature", "city", "people", "space"];

        for name in filters {
            let filter = Filter::from(name);
            apply_filter(&mut cards, &filter);
            for card in &cards {
                assert_eq!(
                    card.is_visible(),
                    name == ALL || card.category == name,
                    "card {} under filter {}",
                    card.index,
                    name
                );
            }
        }
    }

    #[test]
    fn test_visible_indexes_keep_original_order() {
        let mut cards = cards(&["nature", "city", "nature"]);
        apply_filter(&mut cards, &Filter::from("nature"));
        assert_eq!(visible_indexes(&cards), vec![0, 2]);
    }

    #[test]
    fn test_unknown_category_hides_everything() {
        let mut cards = cards(&["nature", "city"]);
        apply_filter(&mut cards, &Filter::from("space"));
        assert!(visible_indexes(&cards).is_empty());
    }

    #[test]
    fn test_all_sentinel_parses_to_all() {
        assert_eq!(Filter::from("all"), Filter::All);
        assert_eq!(Filter::from("All"), Filter::Category("All".into()));
        assert_eq!(Filter::All.to_string(), "all");
    }
}
