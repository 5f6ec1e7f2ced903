use iced::widget::image::Handle;
use std::collections::HashMap;

use crate::state::data::{LightboxDisplay, Visibility};
use crate::state::filter::Filter;
use crate::state::Renderer;

/// Retained presentation state for the iced views
///
/// The gallery core writes here through `Renderer`; `view` only reads.
/// Image loads the core asks for are queued and picked up by the
/// application after each update.
#[derive(Debug, Default)]
pub struct Surface {
    visibility: HashMap<usize, Visibility>,
    active_filter: Filter,
    lightbox: Option<LightboxDisplay>,
    close_focused: bool,
    gallery_nav_visible: bool,
    thumbnails: HashMap<usize, Handle>,
    full_image: Option<(usize, Handle)>,
    pending_thumbnails: Vec<(usize, String)>,
    pending_full: Option<(usize, String)>,
    sources: HashMap<usize, String>,
}

impl Surface {
    /// Surface for a freshly loaded gallery; `sources` maps card index to image source
    pub fn new(sources: HashMap<usize, String>) -> Self {
        Self {
            gallery_nav_visible: true,
            sources,
            ..Self::default()
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visibility
            .get(&index)
            .map_or(true, |visibility| *visibility == Visibility::Visible)
    }

    pub fn active_filter(&self) -> &Filter {
        &self.active_filter
    }

    pub fn lightbox(&self) -> Option<&LightboxDisplay> {
        self.lightbox.as_ref()
    }

    pub fn close_focused(&self) -> bool {
        self.close_focused
    }

    pub fn gallery_nav_visible(&self) -> bool {
        self.gallery_nav_visible
    }

    pub fn thumbnail(&self, index: usize) -> Option<&Handle> {
        self.thumbnails.get(&index)
    }

    /// Full-size image for the card currently in the lightbox, once loaded
    pub fn full_image(&self) -> Option<&Handle> {
        let shown = self.lightbox.as_ref()?.index;
        match &self.full_image {
            Some((index, handle)) if *index == shown => Some(handle),
            _ => None,
        }
    }

    pub fn set_thumbnail(&mut self, index: usize, handle: Handle) {
        self.thumbnails.insert(index, handle);
    }

    /// Store a loaded full-size image. Results for a card the lightbox has
    /// already moved away from are dropped; returns whether it was kept.
    pub fn set_full_image(&mut self, index: usize, handle: Handle) -> bool {
        if self.lightbox.as_ref().map(|display| display.index) != Some(index) {
            return false;
        }
        self.full_image = Some((index, handle));
        true
    }

    /// Thumbnail loads requested since the last call
    pub fn take_thumbnail_requests(&mut self) -> Vec<(usize, String)> {
        std::mem::take(&mut self.pending_thumbnails)
    }

    /// Full-size load requested since the last call
    pub fn take_full_image_request(&mut self) -> Option<(usize, String)> {
        self.pending_full.take()
    }
}

impl Renderer for Surface {
    fn set_card_visibility(&mut self, index: usize, visibility: Visibility) {
        self.visibility.insert(index, visibility);
    }

    fn set_active_filter(&mut self, filter: &Filter) {
        self.active_filter = filter.clone();
    }

    fn show_lightbox(&mut self, display: &LightboxDisplay) {
        let loaded = matches!(&self.full_image, Some((index, _)) if *index == display.index);
        if !loaded {
            self.pending_full = Some((display.index, display.image_source.clone()));
        }
        self.lightbox = Some(display.clone());
    }

    fn hide_lightbox(&mut self) {
        self.lightbox = None;
        self.close_focused = false;
        self.pending_full = None;
    }

    fn focus_close_control(&mut self) {
        self.close_focused = true;
    }

    fn reveal_card(&mut self, index: usize) {
        if let Some(source) = self.sources.get(&index) {
            self.pending_thumbnails.push((index, source.clone()));
        }
    }

    fn set_gallery_nav_visible(&mut self, visible: bool) {
        self.gallery_nav_visible = visible;
    }
}
