/// Presentation seam between the gallery core and whatever draws it
///
/// `Gallery` calls these after every state change. The iced UI implements
/// it with `ui::Surface`; tests use a recording implementation.
use super::data::{LightboxDisplay, Visibility};
use super::filter::Filter;

pub trait Renderer {
    fn set_card_visibility(&mut self, index: usize, visibility: Visibility);

    fn set_active_filter(&mut self, filter: &Filter);

    fn show_lightbox(&mut self, display: &LightboxDisplay);

    fn hide_lightbox(&mut self);

    /// Tab inside the open lightbox keeps focus on the close control
    fn focus_close_control(&mut self) {}

    /// A tile came near the viewport and may start loading its image
    fn reveal_card(&mut self, _index: usize) {}

    /// Gallery step buttons are hidden on narrow windows
    fn set_gallery_nav_visible(&mut self, _visible: bool) {}
}
