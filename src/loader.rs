use egui::ColorImage;
use log::{error, info};

use crate::error::ImageLoadFailure;
use crate::http;
use crate::state::{BackgroundImage, LoadTicket};
use crate::task::{Poll, TaskHandle};

/// A finished background load, tagged with the ticket it was started for
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<BackgroundImage, ImageLoadFailure>,
}

/// A background load in flight, with the ticket it answers
#[derive(Debug)]
pub struct PendingLoad {
    url: String,
    ticket: LoadTicket,
    handle: TaskHandle<LoadOutcome>,
}

impl PendingLoad {
    pub fn new(url: impl Into<String>, ticket: LoadTicket, handle: TaskHandle<LoadOutcome>) -> Self {
        Self {
            url: url.into(),
            ticket,
            handle,
        }
    }

    /// The outcome, once the worker has finished.
    ///
    /// A worker that went away without reporting counts as a failed load for
    /// its ticket, so the editor never waits on it forever.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        match self.handle.try_take() {
            Poll::Pending => None,
            Poll::Done(outcome) => Some(outcome),
            Poll::Lost => {
                error!("Background loader for {} exited without a result", self.url);
                Some(LoadOutcome {
                    ticket: self.ticket,
                    result: Err(ImageLoadFailure::new(
                        self.url.as_str(),
                        "loader exited without a result",
                    )),
                })
            }
        }
    }
}

/// Decode raw image bytes (PNG, JPEG, ...) into texture-ready pixels
pub fn decode_background(url: &str, bytes: &[u8]) -> Result<BackgroundImage, ImageLoadFailure> {
    let decoded = image::load_from_memory(bytes).map_err(|err| ImageLoadFailure::new(url, err))?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    if size[0] == 0 || size[1] == 0 {
        return Err(ImageLoadFailure::new(url, "image has no pixels"));
    }

    let pixels = ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
    Ok(BackgroundImage::new(url, pixels))
}

/// Blocking fetch + decode. Call from a worker thread.
pub fn fetch_background(url: &str) -> Result<BackgroundImage, ImageLoadFailure> {
    let fail = |err: reqwest::Error| ImageLoadFailure::new(url, err);

    let response = http::client().map_err(fail)?.get(url).send().map_err(fail)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ImageLoadFailure::new(url, format!("HTTP {status}")));
    }
    let bytes = response.bytes().map_err(fail)?;
    info!("Fetched {} bytes from {url}", bytes.len());

    decode_background(url, &bytes)
}

/// Fetches background images off the UI thread
#[derive(Debug, Clone, Default)]
pub struct BackgroundLoader {
    repaint: Option<egui::Context>,
}

impl BackgroundLoader {
    /// A loader that wakes the UI when a result is ready
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            repaint: Some(ctx.clone()),
        }
    }

    pub fn spawn(&self, url: &str, ticket: LoadTicket) -> PendingLoad {
        let job_url = url.to_owned();
        let repaint = self.repaint.clone();
        let handle = TaskHandle::spawn(
            "background-loader",
            move || LoadOutcome {
                ticket,
                result: fetch_background(&job_url),
            },
            move || {
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            },
        );
        PendingLoad::new(url, ticket, handle)
    }
}
