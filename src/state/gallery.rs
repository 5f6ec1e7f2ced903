/// The gallery: cards, active filter and lightbox in one owned object
///
/// Every user action goes through a method here. Methods change state
/// first and then tell the renderer what changed, so the navigation
/// rules can be tested without a window.
use super::data::{Card, LightboxDisplay};
use super::filter::{self, Filter};
use super::library::Catalog;
use super::lightbox::{self, Lightbox};
use super::renderer::Renderer;
use super::reveal::{GridGeometry, RevealTracker};
use crate::config::Settings;

/// Keys the gallery reacts to while the lightbox is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Escape,
    Tab,
    Enter,
}

#[derive(Debug, Clone)]
pub struct Gallery {
    title: Option<String>,
    cards: Vec<Card>,
    categories: Vec<String>,
    filter: Filter,
    lightbox: Lightbox,
    close_focused: bool,
    compact_width: f32,
    reveal: RevealTracker,
}

impl Gallery {
    pub fn new(catalog: Catalog, settings: &Settings) -> Self {
        Self {
            title: catalog.title,
            cards: catalog.cards,
            categories: catalog.categories,
            filter: Filter::All,
            lightbox: Lightbox::new(),
            close_focused: false,
            compact_width: settings.compact_width,
            reveal: RevealTracker::new(GridGeometry::from_settings(settings), settings.reveal_margin),
        }
    }

    /// First render: show everything and size the layout
    pub fn init(&mut self, width: f32, height: f32, renderer: &mut impl Renderer) {
        self.resize(width, height, renderer);
        self.apply_filter(Filter::All, renderer);
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Filter choices in button order, starting with the "all" sentinel
    pub fn filters(&self) -> Vec<Filter> {
        std::iter::once(Filter::All)
            .chain(self.categories.iter().map(|c| Filter::from(c.as_str())))
            .collect()
    }

    pub fn active_filter(&self) -> &Filter {
        &self.filter
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn is_open(&self) -> bool {
        self.lightbox.is_open()
    }

    pub fn current_index(&self) -> usize {
        self.lightbox.current()
    }

    pub fn columns(&self) -> usize {
        self.reveal.columns()
    }

    pub fn geometry(&self) -> GridGeometry {
        self.reveal.geometry()
    }

    /// Indexes of the cards the active filter leaves on screen
    pub fn visible_indexes(&self) -> Vec<usize> {
        filter::visible_indexes(&self.cards)
    }

    pub fn apply_filter(&mut self, filter: Filter, renderer: &mut impl Renderer) {
        filter::apply_filter(&mut self.cards, &filter);
        tracing::debug!(filter = %filter, visible = self.visible_indexes().len(), "Filter applied");

        renderer.set_active_filter(&filter);
        for card in &self.cards {
            renderer.set_card_visibility(card.index, card.visibility);
        }
        self.filter = filter;
        self.reveal_pending(renderer);
    }

    /// Open the lightbox on `index`. Does nothing for an unknown index.
    pub fn open(&mut self, index: usize, renderer: &mut impl Renderer) -> bool {
        let Some(card) = self.cards.get(index) else {
            tracing::debug!(index, "Ignoring open for unknown card");
            return false;
        };

        let display = LightboxDisplay::from(card);
        self.lightbox.show(index);
        renderer.show_lightbox(&display);
        true
    }

    pub fn close(&mut self, renderer: &mut impl Renderer) {
        if !self.lightbox.is_open() {
            return;
        }
        self.lightbox.hide();
        self.close_focused = false;
        renderer.hide_lightbox();
    }

    pub fn next(&mut self, renderer: &mut impl Renderer) {
        if !self.lightbox.is_open() {
            return;
        }
        let visible = self.visible_indexes();
        if let Some(target) = lightbox::step_next(&visible, self.lightbox.current()) {
            self.open(target, renderer);
        }
    }

    pub fn previous(&mut self, renderer: &mut impl Renderer) {
        if !self.lightbox.is_open() {
            return;
        }
        let visible = self.visible_indexes();
        if let Some(target) = lightbox::step_previous(&visible, self.lightbox.current()) {
            self.open(target, renderer);
        }
    }

    /// Gallery-level "next" button; opens the lightbox from either state
    pub fn gallery_next(&mut self, renderer: &mut impl Renderer) {
        let visible = self.visible_indexes();
        if let Some(target) = lightbox::gallery_step_next(&visible, self.lightbox.current()) {
            self.open(target, renderer);
        }
    }

    /// Gallery-level "previous" button; opens the lightbox from either state
    pub fn gallery_previous(&mut self, renderer: &mut impl Renderer) {
        let visible = self.visible_indexes();
        if let Some(target) = lightbox::gallery_step_previous(&visible, self.lightbox.current()) {
            self.open(target, renderer);
        }
    }

    /// Keyboard handling. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: NavKey, renderer: &mut impl Renderer) -> bool {
        if !self.lightbox.is_open() {
            return false;
        }

        match key {
            NavKey::ArrowRight => self.next(renderer),
            NavKey::ArrowLeft => self.previous(renderer),
            NavKey::Escape => self.close(renderer),
            NavKey::Tab => {
                self.close_focused = true;
                renderer.focus_close_control();
            }
            NavKey::Enter => {
                if !self.close_focused {
                    return false;
                }
                self.close(renderer);
            }
        }
        true
    }

    pub fn close_focused(&self) -> bool {
        self.close_focused
    }

    pub fn resize(&mut self, width: f32, height: f32, renderer: &mut impl Renderer) {
        renderer.set_gallery_nav_visible(width >= self.compact_width);
        self.reveal.set_width(width);
        self.reveal.set_height(height);
        self.reveal_pending(renderer);
    }

    /// The grid scrolled; `offset` is the distance from the top of the content
    pub fn scrolled(&mut self, offset: f32, height: f32, renderer: &mut impl Renderer) {
        self.reveal.set_viewport(offset, height);
        self.reveal_pending(renderer);
    }

    fn reveal_pending(&mut self, renderer: &mut impl Renderer) {
        let visible = self.visible_indexes();
        for index in self.reveal.reveal(&visible) {
            renderer.reveal_card(index);
        }
    }
}
