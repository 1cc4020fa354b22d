use caption_canvas::command::{Command, CommandError};
use caption_canvas::element::{ObjectId, ObjectKind, ShapeKind, TextMeasure, canvas_center};
use caption_canvas::state::{BackgroundImage, EditorState, LoadState, TextAction, ToolMode};
use egui::{Color32, ColorImage, Vec2};

const URL: &str = "http://x/img.png";

fn hex(s: &str) -> Color32 {
    Color32::from_hex(s).unwrap()
}

// Helper to create an editor whose background has finished loading
fn ready_editor() -> EditorState {
    let mut editor = EditorState::new();
    let ticket = editor.initialize(URL).unwrap();
    let image = BackgroundImage::new(URL, ColorImage::new([400, 300], Color32::WHITE));
    assert!(editor.on_background_loaded(ticket, Ok(image)));
    editor
}

// A context that has run one frame, so its fonts are loaded
fn laid_out_context() -> egui::Context {
    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |_| {});
    ctx
}

fn background_id(editor: &EditorState) -> ObjectId {
    editor.scene().objects()[0].id()
}

fn assert_selection_valid(editor: &EditorState) {
    if let Some(id) = editor.selection() {
        assert!(editor.scene().contains(id), "selection {id} dangles");
    }
}

#[test]
fn test_background_load_creates_centered_selected_image() {
    let editor = ready_editor();

    assert_eq!(editor.load_state(), LoadState::Ready);
    assert_eq!(editor.scene().len(), 1);

    let image = &editor.scene().objects()[0];
    assert_eq!(image.kind_name(), "image");
    assert_eq!(image.center(), canvas_center());
    assert_eq!(
        image.kind(),
        &ObjectKind::Image {
            size: Vec2::new(400.0, 300.0),
            scale: 1.5
        }
    );
    assert_eq!(editor.selection(), Some(image.id()));
}

#[test]
fn test_commands_rejected_until_ready() {
    let mut editor = EditorState::new();
    editor.initialize(URL).unwrap();

    let before = editor.scene().ids();
    assert_eq!(
        editor.add_text("Hi", 18.0, Color32::BLACK),
        Err(CommandError::NotInteractive(LoadState::Loading))
    );
    assert_eq!(
        editor.add_shape(ShapeKind::Circle, Color32::RED),
        Err(CommandError::NotInteractive(LoadState::Loading))
    );
    assert!(editor.delete_selected().is_err());
    assert_eq!(editor.request_export(), Err(CommandError::ExportUnavailable));
    assert_eq!(editor.scene().ids(), before);
}

#[test]
fn test_unknown_shape_is_rejected() {
    let mut editor = ready_editor();
    let before = editor.scene().ids();
    let selection = editor.selection();

    let result = editor.add_shape_named("hexagon", hex("#FF0000"));

    assert!(matches!(result, Err(CommandError::InvalidArgument(_))));
    assert_eq!(editor.scene().ids(), before);
    assert_eq!(editor.selection(), selection);
}

#[test]
fn test_add_shape_defaults() {
    let mut editor = ready_editor();

    let rect = editor.add_shape_named("rectangle", hex("#FF0000")).unwrap();
    let circle = editor.add_shape(ShapeKind::Circle, hex("#00FF00")).unwrap();
    let triangle = editor.add_shape(ShapeKind::Triangle, hex("#0000FF")).unwrap();

    let scene = editor.scene();
    assert_eq!(
        scene.get(rect).unwrap().kind(),
        &ObjectKind::Rectangle {
            size: Vec2::new(100.0, 100.0),
            fill: hex("#FF0000")
        }
    );
    assert_eq!(
        scene.get(circle).unwrap().kind(),
        &ObjectKind::Circle {
            radius: 50.0,
            fill: hex("#00FF00")
        }
    );
    assert_eq!(
        scene.get(triangle).unwrap().kind(),
        &ObjectKind::Triangle {
            size: Vec2::new(100.0, 100.0),
            fill: hex("#0000FF")
        }
    );
    for id in [rect, circle, triangle] {
        assert_eq!(scene.get(id).unwrap().center(), canvas_center());
    }

    // Most recent add is on top and selected
    assert_eq!(scene.ids().last(), Some(&triangle));
    assert_eq!(editor.selection(), Some(triangle));
    assert_eq!(editor.tool_mode(), Some(ToolMode::Shape));
}

#[test]
fn test_repeated_adds_create_new_objects() {
    let mut editor = ready_editor();

    let a = editor.add_shape(ShapeKind::Rectangle, Color32::RED).unwrap();
    let b = editor.add_shape(ShapeKind::Rectangle, Color32::RED).unwrap();
    let c = editor.add_text("Same", 24.0, Color32::BLACK).unwrap();
    let d = editor.add_text("Same", 24.0, Color32::BLACK).unwrap();

    assert_ne!(a, b);
    assert_ne!(c, d);
    assert_eq!(editor.scene().len(), 5);
}

#[test]
fn test_add_text_uses_placeholder_for_empty_content() {
    let mut editor = ready_editor();

    let id = editor.add_text("", 24.0, Color32::BLACK).unwrap();

    match editor.scene().get(id).unwrap().kind() {
        ObjectKind::Text { content, .. } => assert_eq!(content, "Edit me"),
        other => panic!("expected text, got {other:?}"),
    }
    assert_eq!(editor.tool_mode(), Some(ToolMode::Text));
    assert_eq!(editor.text_action(), TextAction::Update);
}

#[test]
fn test_add_then_update_with_same_values_is_identity() {
    let mut editor = ready_editor();

    let id = editor.add_text("Hello", 24.0, hex("#000000")).unwrap();
    let created = editor.scene().get(id).unwrap().clone();

    editor.update_text(24.0, hex("#000000"), "Hello").unwrap();

    assert_eq!(editor.scene().get(id).unwrap(), &created);
}

#[test]
fn test_update_text_restyles_in_place() {
    let mut editor = ready_editor();
    let id = editor.add_text("Hello", 24.0, Color32::BLACK).unwrap();
    editor.add_shape(ShapeKind::Circle, Color32::RED).unwrap();
    editor.on_external_selection_changed(Some(id)).unwrap();
    let order = editor.scene().ids();

    editor.update_text(40.0, hex("#FF00FF"), "Bigger").unwrap();

    assert_eq!(
        editor.scene().get(id).unwrap().kind(),
        &ObjectKind::Text {
            content: "Bigger".to_owned(),
            font_size: 40.0,
            color: hex("#FF00FF"),
        }
    );
    assert_eq!(editor.scene().ids(), order);
    assert_eq!(editor.selection(), Some(id));
}

#[test]
fn test_update_text_skips_non_text_selection() {
    let mut editor = ready_editor();
    let shape = editor.add_shape(ShapeKind::Rectangle, Color32::RED).unwrap();
    let before = editor.scene().get(shape).unwrap().clone();

    assert_eq!(
        editor.update_text(30.0, Color32::BLUE, "nope"),
        Err(CommandError::NotText)
    );
    assert_eq!(editor.scene().get(shape).unwrap(), &before);

    editor.on_external_selection_changed(None).unwrap();
    assert_eq!(
        editor.update_text(30.0, Color32::BLUE, "nope"),
        Err(CommandError::NoSelection)
    );
}

#[test]
fn test_bring_forward_on_unselected_object_is_noop() {
    let mut editor = ready_editor();
    editor.add_shape_named("circle", hex("#00FF00")).unwrap();
    editor.add_text("Hi", 18.0, hex("#0000FF")).unwrap();
    let order = editor.scene().ids();

    // The text is selected and already on top
    editor.bring_forward().unwrap();

    assert_eq!(editor.scene().ids(), order);
}

#[test]
fn test_reorder_at_boundaries_is_idempotent() {
    let mut editor = ready_editor();
    let background = background_id(&editor);
    let top = editor.add_shape(ShapeKind::Rectangle, Color32::RED).unwrap();
    let order = editor.scene().ids();

    editor.bring_forward().unwrap();
    editor.bring_forward().unwrap();
    assert_eq!(editor.scene().ids(), order);

    editor.on_external_selection_changed(Some(background)).unwrap();
    editor.send_backward().unwrap();
    assert_eq!(editor.scene().ids(), order);
    assert_eq!(editor.scene().ids().last(), Some(&top));
}

#[test]
fn test_reorder_swaps_with_neighbor() {
    let mut editor = ready_editor();
    let background = background_id(&editor);
    let rect = editor.add_shape(ShapeKind::Rectangle, Color32::RED).unwrap();
    let circle = editor.add_shape(ShapeKind::Circle, Color32::GREEN).unwrap();

    editor.on_external_selection_changed(Some(rect)).unwrap();
    editor.bring_forward().unwrap();
    assert_eq!(editor.scene().ids(), vec![background, circle, rect]);

    editor.send_backward().unwrap();
    editor.send_backward().unwrap();
    assert_eq!(editor.scene().ids(), vec![rect, background, circle]);
    assert_eq!(editor.selection(), Some(rect));
}

#[test]
fn test_reorder_without_selection_is_rejected() {
    let mut editor = ready_editor();
    editor.on_external_selection_changed(None).unwrap();
    let order = editor.scene().ids();

    assert_eq!(editor.bring_forward(), Err(CommandError::NoSelection));
    assert_eq!(editor.send_backward(), Err(CommandError::NoSelection));
    assert_eq!(editor.scene().ids(), order);
}

#[test]
fn test_delete_clears_selection_and_tool_mode() {
    let mut editor = ready_editor();
    let id = editor.add_text("Bye", 24.0, Color32::BLACK).unwrap();

    editor.delete_selected().unwrap();

    assert!(!editor.scene().contains(id));
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.tool_mode(), None);
    assert_eq!(editor.delete_selected(), Err(CommandError::NoSelection));
}

#[test]
fn test_background_can_be_deleted() {
    let mut editor = ready_editor();

    editor.delete_selected().unwrap();

    assert!(editor.scene().is_empty());
    assert_eq!(editor.selection(), None);
    assert!(editor.can_export());
}

#[test]
fn test_external_selection_syncs_text_tool() {
    let mut editor = ready_editor();
    let text = editor.add_text("Caption", 32.0, hex("#112233")).unwrap();
    let shape = editor.add_shape(ShapeKind::Triangle, Color32::RED).unwrap();
    editor.text_tool.content = "stale form value".to_owned();

    editor.on_external_selection_changed(Some(text)).unwrap();
    assert_eq!(editor.selection(), Some(text));
    assert_eq!(editor.text_tool.content, "Caption");
    assert_eq!(editor.text_tool.font_size, 32.0);
    assert_eq!(editor.text_tool.font_color, hex("#112233"));
    assert_eq!(editor.tool_mode(), Some(ToolMode::Text));
    assert_eq!(editor.text_action(), TextAction::Update);

    editor.on_external_selection_changed(Some(shape)).unwrap();
    assert_eq!(editor.selection(), Some(shape));
    assert_eq!(editor.tool_mode(), None);
    assert_eq!(editor.text_action(), TextAction::Add);

    editor.on_external_selection_changed(None).unwrap();
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.tool_mode(), None);
}

#[test]
fn test_external_selection_of_unknown_id_clears_selection() {
    let mut editor = ready_editor();

    editor.on_external_selection_changed(Some(ObjectId::new())).unwrap();

    assert_eq!(editor.selection(), None);
}

#[test]
fn test_translate_selected_moves_object() {
    let mut editor = ready_editor();
    let id = editor.add_shape(ShapeKind::Circle, Color32::RED).unwrap();

    editor.translate_selected(Vec2::new(15.0, -5.0)).unwrap();

    assert_eq!(
        editor.scene().get(id).unwrap().center(),
        canvas_center() + Vec2::new(15.0, -5.0)
    );
}

#[test]
fn test_hit_test_finds_topmost_object() {
    let mut editor = ready_editor();
    let background = background_id(&editor);
    let circle = editor.add_shape(ShapeKind::Circle, Color32::RED).unwrap();
    let center = canvas_center();
    let ctx = laid_out_context();

    assert_eq!(editor.scene().hit_test(center, &ctx), Some(circle));
    // Inside the circle's bounding box corner but outside the circle itself
    assert_eq!(
        editor.scene().hit_test(center + Vec2::new(45.0, 45.0), &ctx),
        Some(background)
    );
    assert_eq!(editor.scene().hit_test(egui::pos2(1.0, 1.0), &ctx), None);
}

#[test]
fn test_text_hit_box_follows_laid_out_text() {
    let ctx = laid_out_context();
    let mut editor = ready_editor();
    let text = editor.add_text("WWWWWWWW", 48.0, Color32::BLACK).unwrap();

    let painted = ctx.text_size("WWWWWWWW", 48.0);
    let on_last_glyph = canvas_center() + Vec2::new(painted.x / 2.0 - 2.0, 0.0);

    assert_eq!(editor.scene().hit_test(on_last_glyph, &ctx), Some(text));
    let bounds = editor.scene().get(text).unwrap().bounds(&ctx);
    assert!(bounds.width() >= painted.x);
    assert!(bounds.height() >= painted.y);
}

#[test]
fn test_scale_selected_resizes_shapes() {
    let mut editor = ready_editor();
    let rect = editor.add_shape(ShapeKind::Rectangle, Color32::RED).unwrap();
    editor.scale_selected(2.0).unwrap();
    let circle = editor.add_shape(ShapeKind::Circle, Color32::RED).unwrap();
    editor.scale_selected(0.5).unwrap();

    assert_eq!(
        editor.scene().get(rect).unwrap().kind(),
        &ObjectKind::Rectangle {
            size: Vec2::new(200.0, 200.0),
            fill: Color32::RED
        }
    );
    assert_eq!(
        editor.scene().get(circle).unwrap().kind(),
        &ObjectKind::Circle {
            radius: 25.0,
            fill: Color32::RED
        }
    );
    // Resizing keeps the center in place
    assert_eq!(editor.scene().get(circle).unwrap().center(), canvas_center());
}

#[test]
fn test_scale_selected_background_and_floor() {
    let mut editor = ready_editor();
    let background = background_id(&editor);

    editor.scale_selected(2.0).unwrap();
    assert_eq!(
        editor.scene().get(background).unwrap().kind(),
        &ObjectKind::Image {
            size: Vec2::new(400.0, 300.0),
            scale: 3.0
        }
    );

    let triangle = editor.add_shape(ShapeKind::Triangle, Color32::BLUE).unwrap();
    editor.scale_selected(0.001).unwrap();
    assert_eq!(
        editor.scene().get(triangle).unwrap().kind(),
        &ObjectKind::Triangle {
            size: Vec2::new(4.0, 4.0),
            fill: Color32::BLUE
        }
    );
}

#[test]
fn test_scale_selected_caption_moves_text_tool_size() {
    let mut editor = ready_editor();
    let id = editor.add_text("Grow", 24.0, Color32::BLACK).unwrap();

    Command::ScaleSelected(2.0).execute(&mut editor).unwrap();

    assert!(matches!(
        editor.scene().get(id).unwrap().kind(),
        ObjectKind::Text { font_size, .. } if *font_size == 48.0
    ));
    assert_eq!(editor.text_tool.font_size, 48.0);

    // Font size stays in range
    editor.scale_selected(10.0).unwrap();
    assert_eq!(editor.text_tool.font_size, 120.0);
}

#[test]
fn test_scale_selected_rejections() {
    let mut editor = EditorState::new();
    editor.initialize(URL).unwrap();
    assert_eq!(
        editor.scale_selected(2.0),
        Err(CommandError::NotInteractive(LoadState::Loading))
    );

    let mut editor = ready_editor();
    let before = editor.scene().objects().to_vec();
    for factor in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            editor.scale_selected(factor),
            Err(CommandError::InvalidArgument(_))
        ));
    }
    editor.on_external_selection_changed(None).unwrap();
    assert_eq!(editor.scale_selected(2.0), Err(CommandError::NoSelection));
    assert_eq!(editor.scene().objects(), before.as_slice());
}

#[test]
fn test_selection_never_dangles() {
    let mut editor = ready_editor();
    let script = vec![
        Command::AddShape {
            kind: ShapeKind::Rectangle,
            fill: Color32::RED,
        },
        Command::AddText {
            content: "one".to_owned(),
            font_size: 20.0,
            font_color: Color32::BLACK,
        },
        Command::SendBackward,
        Command::DeleteSelected,
        Command::BringForward,
        Command::DeleteSelected,
        Command::AddShape {
            kind: ShapeKind::Triangle,
            fill: Color32::BLUE,
        },
        Command::SelectObject(Some(ObjectId::new())),
        Command::DeleteSelected,
        Command::UpdateText {
            content: "two".to_owned(),
            font_size: 20.0,
            font_color: Color32::BLACK,
        },
        Command::MoveSelected(Vec2::new(3.0, 3.0)),
        Command::AddShape {
            kind: ShapeKind::Circle,
            fill: Color32::GREEN,
        },
        Command::DeleteSelected,
    ];

    for command in script {
        let _ = command.execute(&mut editor);
        assert_selection_valid(&editor);
        if command == Command::DeleteSelected {
            assert_eq!(editor.selection(), None);
        }
    }
}

#[test]
fn test_command_execute_dispatches() {
    let mut editor = ready_editor();

    Command::AddText {
        content: "Hi".to_owned(),
        font_size: 18.0,
        font_color: Color32::BLUE,
    }
    .execute(&mut editor)
    .unwrap();
    assert_eq!(editor.scene().len(), 2);

    Command::UpdateText {
        content: "Hello".to_owned(),
        font_size: 18.0,
        font_color: Color32::BLUE,
    }
    .execute(&mut editor)
    .unwrap();
    assert!(matches!(
        editor.selected().unwrap().kind(),
        ObjectKind::Text { content, .. } if content == "Hello"
    ));

    Command::DeleteSelected.execute(&mut editor).unwrap();
    assert_eq!(editor.scene().len(), 1);
    assert_eq!(Command::DeleteSelected.name(), "delete_selected");
}
