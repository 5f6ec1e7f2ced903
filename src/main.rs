use iced::event::{self, Event};
use iced::keyboard::{self, key::Named, Key};
use iced::widget::image::Handle;
use iced::widget::{button, column, horizontal_space, row, scrollable, stack, text};
use iced::{window, Alignment, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod media;
mod state;
mod ui;

use config::Settings;
use state::filter::Filter;
use state::library::{self, Catalog};
use state::{Gallery, NavKey};
use ui::Surface;

const DEFAULT_WINDOW: Size = Size::new(1280.0, 800.0);

/// Vertical space taken by the header, filter bar and status line
const CHROME_HEIGHT: f32 = 150.0;

/// Main application state
struct LumenGallery {
    settings: Settings,
    gallery: Gallery,
    /// What the views draw; written by the gallery through `Renderer`
    surface: Surface,
    window: Size,
    /// Bumped on every gallery load so late results from an old gallery are dropped
    generation: LoadGeneration,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    FilterSelected(Filter),
    CardClicked(usize),
    Next,
    Previous,
    Close,
    /// Click on the dimmed area around the lightbox panel
    BackdropClicked,
    GalleryNext,
    GalleryPrevious,
    Key(NavKey),
    Resized(Size),
    Scrolled(scrollable::Viewport),
    /// User clicked the "Open Manifest" button
    OpenManifest,
    /// User clicked the "Open Folder" button
    OpenFolder,
    GalleryLoaded(u64, Result<Catalog, String>),
    ThumbnailReady(u64, usize, Result<PathBuf, String>),
    FullImageReady(u64, usize, Result<Handle, String>),
}

impl LumenGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();

        let mut app = LumenGallery {
            gallery: Gallery::new(Catalog::default(), &settings),
            surface: Surface::new(HashMap::new()),
            settings,
            window: DEFAULT_WINDOW,
            generation: LoadGeneration::default(),
            status: "Open a gallery manifest or an image folder.".to_string(),
        };
        app.install(Catalog::default());

        // A path on the command line wins over the configured one
        let startup = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .or_else(|| app.settings.gallery_path.clone());

        let task = match startup {
            Some(path) => app.load(path),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        match self.gallery.title() {
            Some(title) => format!("{} - Lumen Gallery", title),
            None => "Lumen Gallery".to_string(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FilterSelected(filter) => {
                self.gallery.apply_filter(filter, &mut self.surface);
            }
            Message::CardClicked(index) => {
                self.gallery.open(index, &mut self.surface);
            }
            Message::Next => self.gallery.next(&mut self.surface),
            Message::Previous => self.gallery.previous(&mut self.surface),
            Message::Close | Message::BackdropClicked => self.gallery.close(&mut self.surface),
            Message::GalleryNext => self.gallery.gallery_next(&mut self.surface),
            Message::GalleryPrevious => self.gallery.gallery_previous(&mut self.surface),
            Message::Key(key) => {
                self.gallery.handle_key(key, &mut self.surface);
            }
            Message::Resized(size) => {
                self.window = size;
                self.gallery
                    .resize(size.width, grid_height(size), &mut self.surface);
            }
            Message::Scrolled(viewport) => {
                self.gallery.scrolled(
                    viewport.absolute_offset().y,
                    viewport.bounds().height,
                    &mut self.surface,
                );
            }
            Message::OpenManifest => {
                let file = FileDialog::new()
                    .set_title("Select Gallery Manifest")
                    .add_filter("Gallery manifest", &["json"])
                    .pick_file();

                if let Some(path) = file {
                    return self.load(path);
                }
            }
            Message::OpenFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Images")
                    .pick_folder();

                if let Some(path) = folder {
                    return self.load(path);
                }
            }
            Message::GalleryLoaded(generation, result) => {
                if !self.generation.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(catalog) => {
                        self.status = format!(
                            "{} images in {} categories.",
                            catalog.cards.len(),
                            catalog.categories.len()
                        );
                        tracing::info!("{}", self.status);
                        self.install(catalog);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load gallery: {}", e);
                        self.status = format!("⚠️  Failed to load gallery: {}", e);
                    }
                }
            }
            Message::ThumbnailReady(generation, index, result) => {
                if !self.generation.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(path) => self.surface.set_thumbnail(index, Handle::from_path(path)),
                    Err(e) => tracing::warn!(index, "No thumbnail: {}", e),
                }
            }
            Message::FullImageReady(generation, index, result) => {
                if !self.generation.is_current(generation) {
                    return Task::none();
                }
                match result {
                    Ok(handle) => {
                        if !self.surface.set_full_image(index, handle) {
                            tracing::debug!(index, "Dropped full image for a card no longer shown");
                        }
                    }
                    Err(e) => tracing::warn!(index, "No full image: {}", e),
                }
            }
        }

        self.dispatch_loads()
    }

    /// Start loading a manifest or folder in the background
    fn load(&mut self, path: PathBuf) -> Task<Message> {
        let generation = self.generation.advance();
        self.status = format!("Loading {}...", path.display());
        tracing::info!(path = %path.display(), "Loading gallery");

        Task::perform(library::load_gallery(path), move |result| {
            Message::GalleryLoaded(generation, result.map_err(|e| e.to_string()))
        })
    }

    /// Replace the whole gallery with a freshly loaded catalog
    fn install(&mut self, catalog: Catalog) {
        let sources = catalog
            .cards
            .iter()
            .map(|card| (card.index, card.image_source.clone()))
            .collect();

        self.surface = Surface::new(sources);
        self.gallery = Gallery::new(catalog, &self.settings);
        self.gallery
            .init(self.window.width, grid_height(self.window), &mut self.surface);
    }

    /// Turn image loads queued on the surface into background tasks
    fn dispatch_loads(&mut self) -> Task<Message> {
        let generation = self.generation.current();
        let size = self.settings.thumbnail_size;

        let mut tasks: Vec<Task<Message>> = self
            .surface
            .take_thumbnail_requests()
            .into_iter()
            .map(|(index, source)| {
                Task::perform(media::thumbnail::load_thumbnail(source, size), move |result| {
                    Message::ThumbnailReady(generation, index, result.map_err(|e| e.to_string()))
                })
            })
            .collect();

        if let Some((index, source)) = self.surface.take_full_image_request() {
            tasks.push(Task::perform(
                media::preview::load_full_image(source),
                move |result| {
                    Message::FullImageReady(
                        generation,
                        index,
                        result.map(Handle::from_bytes).map_err(|e| e.to_string()),
                    )
                },
            ));
        }

        Task::batch(tasks)
    }

    /// Keyboard and window events
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                nav_key(&key).map(Message::Key)
            }
            Event::Window(window::Event::Resized(size)) => Some(Message::Resized(size)),
            _ => None,
        })
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text(self.gallery.title().unwrap_or("Lumen Gallery").to_string()).size(28),
            horizontal_space(),
            ui::grid::gallery_nav(&self.surface),
            button("Open Manifest")
                .on_press(Message::OpenManifest)
                .padding(10),
            button("Open Folder")
                .on_press(Message::OpenFolder)
                .padding(10),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let base = column![
            header,
            ui::grid::filter_bar(&self.gallery, &self.surface),
            ui::grid::card_grid(&self.gallery, &self.surface),
            text(&self.status).size(14),
        ]
        .spacing(16)
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill);

        match self.surface.lightbox() {
            Some(display) => stack![base, ui::lightbox::overlay(&self.surface, display)].into(),
            None => base.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Counter tagging background results with the gallery load they belong to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LoadGeneration(u64);

impl LoadGeneration {
    /// Start a new load; results tagged with older values become stale
    fn advance(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    fn current(&self) -> u64 {
        self.0
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.0
    }
}

fn nav_key(key: &Key) -> Option<NavKey> {
    match key {
        Key::Named(Named::ArrowRight) => Some(NavKey::ArrowRight),
        Key::Named(Named::ArrowLeft) => Some(NavKey::ArrowLeft),
        Key::Named(Named::Escape) => Some(NavKey::Escape),
        Key::Named(Named::Tab) => Some(NavKey::Tab),
        Key::Named(Named::Enter) => Some(NavKey::Enter),
        _ => None,
    }
}

fn grid_height(window: Size) -> f32 {
    (window.height - CHROME_HEIGHT).max(0.0)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lumen_gallery=info,wgpu=warn,iced=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> iced::Result {
    init_tracing();

    iced::application(LumenGallery::title, LumenGallery::update, LumenGallery::view)
        .subscription(LumenGallery::subscription)
        .theme(LumenGallery::theme)
        .window_size(DEFAULT_WINDOW)
        .centered()
        .run_with(LumenGallery::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_key_mapping() {
        assert_eq!(nav_key(&Key::Named(Named::ArrowRight)), Some(NavKey::ArrowRight));
        assert_eq!(nav_key(&Key::Named(Named::Tab)), Some(NavKey::Tab));
        assert_eq!(nav_key(&Key::Character("a".into())), None);
    }

    #[test]
    fn test_results_from_replaced_gallery_are_stale() {
        let mut generation = LoadGeneration::default();
        assert!(generation.is_current(0));

        let first = generation.advance();
        let second = generation.advance();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_eq!(generation.current(), second);
    }

    #[test]
    fn test_grid_height_never_negative() {
        assert_eq!(grid_height(Size::new(800.0, 100.0)), 0.0);
        assert_eq!(grid_height(Size::new(800.0, 950.0)), 800.0);
    }
}
