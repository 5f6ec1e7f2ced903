/// iced views and the renderer they read from

pub mod grid;
pub mod lightbox;
pub mod surface;

pub use surface::Surface;
