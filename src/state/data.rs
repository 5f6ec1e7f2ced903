/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the loader, the navigation core and the UI layer.

/// Whether a card is shown under the active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// A single tile in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Position in the original order (unique, never changes)
    pub index: usize,
    /// Category label used by the filter buttons
    pub category: String,
    pub title: String,
    pub caption: String,
    /// Local path (or URL) of the full-size image
    pub image_source: String,
    /// Alternative text; falls back to the title when absent
    pub alt: Option<String>,
    /// The only field that changes after load
    pub visibility: Visibility,
}

impl Card {
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Text used for the lightbox image description
    pub fn alt_text(&self) -> &str {
        match self.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt,
            _ => &self.title,
        }
    }
}

/// What the lightbox overlay shows for the current card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxDisplay {
    pub index: usize,
    pub image_source: String,
    pub alt: String,
    pub title: String,
    pub caption: String,
}

impl From<&Card> for LightboxDisplay {
    fn from(card: &Card) -> Self {
        Self {
            index: card.index,
            image_source: card.image_source.clone(),
            alt: card.alt_text().to_string(),
            title: card.title.clone(),
            caption: card.caption.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(alt: Option<&str>, title: &str) -> Card {
        Card {
            index: 0,
            category: "nature".into(),
            title: title.into(),
            caption: "A caption".into(),
            image_source: "/img/0.jpg".into(),
            alt: alt.map(String::from),
            visibility: Visibility::Visible,
        }
    }

    #[test]
    fn test_alt_text_prefers_alt() {
        assert_eq!(card(Some("Misty lake"), "Lake").alt_text(), "Misty lake");
    }

    #[test]
    fn test_alt_text_falls_back_to_title() {
        assert_eq!(card(None, "Lake").alt_text(), "Lake");
        assert_eq!(card(Some(""), "Lake").alt_text(), "Lake");
        assert_eq!(card(None, "").alt_text(), "");
    }
}
