/// Card grid and filter bar
use iced::widget::{button, column, container, row, scrollable, text, Column, Image, Row};
use iced::{Alignment, Element, Length, Theme};

use super::Surface;
use crate::state::Gallery;
use crate::Message;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// One button per filter, the active one highlighted
pub fn filter_bar<'a>(gallery: &'a Gallery, surface: &'a Surface) -> Element<'a, Message> {
    let buttons = gallery.filters().into_iter().map(|filter| {
        let style: ButtonStyle = if *surface.active_filter() == filter {
            button::primary
        } else {
            button::secondary
        };
        button(text(filter.label().to_string()))
            .style(style)
            .padding([6, 14])
            .on_press(Message::FilterSelected(filter))
            .into()
    });

    Row::with_children(buttons).spacing(8).into()
}

/// The scrollable tile grid, laid out with the same geometry the reveal
/// tracker uses
pub fn card_grid<'a>(gallery: &'a Gallery, surface: &'a Surface) -> Element<'a, Message> {
    let geometry = gallery.geometry();
    let visible: Vec<usize> = gallery
        .visible_indexes()
        .into_iter()
        .filter(|&index| surface.is_visible(index))
        .collect();

    if visible.is_empty() {
        return container(text("No images in this category").size(16))
            .padding(geometry.padding)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .into();
    }

    let rows = visible.chunks(gallery.columns().max(1)).map(|chunk| {
        Row::with_children(chunk.iter().map(|&index| tile(gallery, surface, index)))
            .spacing(geometry.gap)
            .into()
    });

    let grid = Column::with_children(rows)
        .spacing(geometry.gap)
        .padding(geometry.padding);

    scrollable(grid)
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(Message::Scrolled)
        .into()
}

fn tile<'a>(gallery: &'a Gallery, surface: &'a Surface, index: usize) -> Element<'a, Message> {
    let geometry = gallery.geometry();
    let Some(card) = gallery.card(index) else {
        return column![].into();
    };

    let preview: Element<'a, Message> = match surface.thumbnail(index) {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text(card.alt_text().to_string()).size(14))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let content = column![
        preview,
        text(card.title.clone()).size(14),
        text(card.category.clone()).size(11),
    ]
    .spacing(4)
    .align_x(Alignment::Start);

    button(content)
        .width(geometry.tile)
        .height(geometry.tile)
        .padding(6)
        .style(button::text)
        .on_press(Message::CardClicked(index))
        .into()
}

/// Gallery-level step buttons, hidden on narrow windows
pub fn gallery_nav<'a>(surface: &'a Surface) -> Element<'a, Message> {
    if !surface.gallery_nav_visible() {
        return row![].into();
    }

    row![
        button(text("◀ Prev"))
            .style(button::secondary)
            .on_press(Message::GalleryPrevious),
        button(text("Next ▶"))
            .style(button::secondary)
            .on_press(Message::GalleryNext),
    ]
    .spacing(8)
    .into()
}
