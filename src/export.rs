use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use egui::ColorImage;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::{info, warn};

use crate::element::CANVAS_SIZE;
use crate::error::ExportError;
use crate::util::time;

// Last timestamp handed out, so two exports in the same millisecond still
// get distinct names
static LAST_EXPORT_STAMP: AtomicU64 = AtomicU64::new(0);

fn next_export_stamp() -> u64 {
    let now = time::timestamp_millis();
    let prev = LAST_EXPORT_STAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
            Some(now.max(prev + 1))
        })
        .unwrap_or(now);
    now.max(prev + 1)
}

pub fn file_name_for(stamp: u64) -> String {
    format!("design-{stamp}.png")
}

/// A pending export: the name the captured frame will be written under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub stamp: u64,
    pub file_name: String,
}

impl ExportRequest {
    /// Create a request with a name no earlier request in this process used
    pub fn new() -> Self {
        let stamp = next_export_stamp();
        Self {
            stamp,
            file_name: file_name_for(stamp),
        }
    }
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames to wait for a requested screenshot before giving up on it
pub const EXPORT_FRAME_BUDGET: u32 = 60;

/// An export waiting for its screenshot to arrive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExport {
    request: ExportRequest,
    frames_waited: u32,
}

impl PendingExport {
    pub fn new(request: ExportRequest) -> Self {
        Self {
            request,
            frames_waited: 0,
        }
    }

    pub fn request(&self) -> &ExportRequest {
        &self.request
    }

    pub fn into_request(self) -> ExportRequest {
        self.request
    }

    /// Count one more frame without a screenshot. Returns `false` once the
    /// budget is spent and the export should be dropped.
    pub fn tick(&mut self) -> bool {
        self.frames_waited += 1;
        if self.frames_waited > EXPORT_FRAME_BUDGET {
            warn!(
                "No screenshot after {} frames, dropping {}",
                EXPORT_FRAME_BUDGET, self.request.file_name
            );
            return false;
        }
        true
    }
}

/// Writes captured canvas frames to disk as PNG files
#[derive(Debug, Clone)]
pub struct ExportService {
    dir: PathBuf,
}

impl ExportService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Canvas size in output pixels
    pub fn output_size() -> (u32, u32) {
        (CANVAS_SIZE.x as u32, CANVAS_SIZE.y as u32)
    }

    fn to_rgba(frame: &ColorImage) -> Result<RgbaImage, ExportError> {
        let [width, height] = frame.size;
        if width == 0 || height == 0 {
            return Err(ExportError::EmptyFrame);
        }

        let raw: Vec<u8> = frame
            .pixels
            .iter()
            .flat_map(|pixel| pixel.to_srgba_unmultiplied())
            .collect();
        RgbaImage::from_raw(width as u32, height as u32, raw).ok_or(ExportError::EmptyFrame)
    }

    fn encode(buffer: RgbaImage) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(buffer).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Encode a frame as PNG bytes at its own size
    pub fn encode_png(frame: &ColorImage) -> Result<Vec<u8>, ExportError> {
        Self::encode(Self::to_rgba(frame)?)
    }

    /// Write the frame under the request's file name and return the full path.
    ///
    /// The capture's size follows the window and display scale; the file is
    /// always resampled to the canvas size.
    pub fn write(&self, request: &ExportRequest, frame: &ColorImage) -> Result<PathBuf, ExportError> {
        let buffer = Self::to_rgba(frame)?;
        let (width, height) = Self::output_size();
        let buffer = if buffer.dimensions() == (width, height) {
            buffer
        } else {
            imageops::resize(&buffer, width, height, FilterType::Triangle)
        };

        let bytes = Self::encode(buffer)?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&request.file_name);
        std::fs::write(&path, bytes)?;
        info!(
            "Exported {}x{} capture as {width}x{height} design to {}",
            frame.size[0],
            frame.size[1],
            path.display()
        );
        Ok(path)
    }
}
