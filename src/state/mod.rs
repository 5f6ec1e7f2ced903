/// State management module
///
/// This module holds all gallery state, independent of the UI:
/// - Card list loading from manifests and folders (library.rs)
/// - Shared data structures (data.rs)
/// - Category filtering (filter.rs)
/// - Lightbox navigation rules (lightbox.rs)
/// - Deferred tile loading hints (reveal.rs)
/// - The presentation seam (renderer.rs)
/// - The gallery object tying them together (gallery.rs)

pub mod data;
pub mod filter;
pub mod gallery;
pub mod library;
pub mod lightbox;
pub mod renderer;
pub mod reveal;

pub use gallery::{Gallery, NavKey};
pub use renderer::Renderer;
