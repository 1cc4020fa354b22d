use std::collections::HashSet;

use caption_canvas::error::ExportError;
use caption_canvas::export::{EXPORT_FRAME_BUDGET, ExportRequest, ExportService, PendingExport};
use caption_canvas::state::{BackgroundImage, EditorState};
use egui::{Color32, ColorImage};

fn ready_editor() -> EditorState {
    let mut editor = EditorState::new();
    let ticket = editor.initialize("http://x/img.png").unwrap();
    let image = BackgroundImage::new("http://x/img.png", ColorImage::new([8, 8], Color32::WHITE));
    editor.on_background_loaded(ticket, Ok(image));
    editor
}

#[test]
fn test_export_names_are_unique() {
    let editor = ready_editor();

    let names: HashSet<String> = (0..50)
        .map(|_| editor.request_export().unwrap().file_name)
        .collect();

    assert_eq!(names.len(), 50);
    for name in &names {
        assert!(name.starts_with("design-"), "{name}");
        assert!(name.ends_with(".png"), "{name}");
    }
}

#[test]
fn test_export_stamps_increase() {
    let first = ExportRequest::new();
    let second = ExportRequest::new();

    assert!(second.stamp > first.stamp);
    assert_eq!(first.file_name, format!("design-{}.png", first.stamp));
}

#[test]
fn test_export_leaves_scene_untouched() {
    let mut editor = ready_editor();
    editor
        .add_text("Caption", 24.0, Color32::BLACK)
        .unwrap();
    let before = editor.scene().objects().to_vec();
    let selection = editor.selection();

    editor.request_export().unwrap();

    assert_eq!(editor.scene().objects(), before.as_slice());
    assert_eq!(editor.selection(), selection);
}

#[test]
fn test_encode_png_keeps_pixels() {
    let frame = ColorImage::new([4, 3], Color32::from_rgb(10, 20, 30));

    let bytes = ExportService::encode_png(&frame).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

    assert_eq!(decoded.dimensions(), (4, 3));
    assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
}

#[test]
fn test_encode_empty_frame_fails() {
    let frame = ColorImage::new([0, 0], Color32::BLACK);

    assert!(matches!(
        ExportService::encode_png(&frame),
        Err(ExportError::EmptyFrame)
    ));
}

fn export_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("caption_canvas_{name}_{}", std::process::id()))
}

#[test]
fn test_write_resamples_capture_to_canvas_size() {
    let dir = export_dir("hidpi");
    let service = ExportService::new(dir.clone());
    let request = ExportRequest::new();
    // A 2x display capture of a slightly zoomed canvas
    let frame = ColorImage::new([1234, 925], Color32::RED);

    let path = service.write(&request, &frame).unwrap();

    assert_eq!(path, dir.join(&request.file_name));
    let written = image::open(&path).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (800, 600));
    let [r, g, b, a] = written.get_pixel(400, 300).0;
    assert!(r > 250 && g < 5 && b < 5 && a > 250, "{:?}", [r, g, b, a]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_write_same_size_for_any_window() {
    let dir = export_dir("windows");
    let service = ExportService::new(dir.clone());

    for size in [[400, 300], [800, 600], [1600, 1200]] {
        let path = service
            .write(&ExportRequest::new(), &ColorImage::new(size, Color32::WHITE))
            .unwrap();
        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), ExportService::output_size());
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_write_empty_capture_fails() {
    let service = ExportService::new(export_dir("empty"));

    assert!(matches!(
        service.write(&ExportRequest::new(), &ColorImage::new([0, 0], Color32::BLACK)),
        Err(ExportError::EmptyFrame)
    ));
}

#[test]
fn test_pending_export_expires_after_budget() {
    let request = ExportRequest::new();
    let mut pending = PendingExport::new(request.clone());

    for _ in 0..EXPORT_FRAME_BUDGET {
        assert!(pending.tick());
    }
    assert!(!pending.tick());
    assert_eq!(pending.into_request(), request);
}
