/// Modal lightbox overlay
///
/// Clicking the dimmed backdrop closes the lightbox; the inner panel is
/// opaque so clicks on it never reach the backdrop.
use iced::widget::{button, center, column, container, mouse_area, opaque, row, text, Image};
use iced::{Alignment, Color, ContentFit, Element, Length, Theme};

use super::Surface;
use crate::state::data::LightboxDisplay;
use crate::Message;

pub fn overlay<'a>(surface: &'a Surface, display: &'a LightboxDisplay) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match surface.full_image() {
        Some(handle) => Image::new(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text(display.alt.clone()).size(18))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let close_style: fn(&Theme, button::Status) -> button::Style = if surface.close_focused() {
        button::primary
    } else {
        button::secondary
    };

    let controls = row![
        button(text("‹ Prev")).on_press(Message::Previous),
        button(text("Close ✕"))
            .style(close_style)
            .on_press(Message::Close),
        button(text("Next ›")).on_press(Message::Next),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let panel = container(
        column![
            picture,
            text(display.title.clone()).size(24),
            text(display.caption.clone()).size(16),
            controls,
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding(20)
    .max_width(1100.0)
    .max_height(860.0)
    .style(container::rounded_box);

    mouse_area(center(opaque(panel)).style(backdrop))
        .on_press(Message::BackdropClicked)
        .into()
}

fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.85).into()),
        ..container::Style::default()
    }
}
