use std::fmt;
use std::sync::Arc;

use egui::{ColorImage, Vec2};

/// Lifecycle of the background image that a scene is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Loading => write!(f, "loading"),
            LoadState::Ready => write!(f, "ready"),
            LoadState::Failed => write!(f, "failed"),
        }
    }
}

/// Identifies one `initialize` call. Only the ticket of the most recent call
/// is honored when a load result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(pub(crate) u64);

/// A decoded background image, ready to be uploaded as a texture
#[derive(Clone)]
pub struct BackgroundImage {
    pub url: String,
    pub pixels: Arc<ColorImage>,
}

impl BackgroundImage {
    pub fn new(url: impl Into<String>, pixels: ColorImage) -> Self {
        Self {
            url: url.into(),
            pixels: Arc::new(pixels),
        }
    }

    pub fn size(&self) -> Vec2 {
        let [w, h] = self.pixels.size;
        Vec2::new(w as f32, h as f32)
    }
}

// ColorImage's Debug would dump every pixel
impl fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("url", &self.url)
            .field("size", &self.pixels.size)
            .finish()
    }
}
