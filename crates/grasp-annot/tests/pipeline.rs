//! End-to-end run of the annotation workflow: draw, mark, generate,
//! fine-tune, export and read the label file back.

use grasp_annot::{
    read_labels, Engine, MapKind, PaintMode, ToolMode,
};
use nalgebra::Point2;

const IMAGE: (u32, u32) = (640, 480);
const VIEWPORT: (u32, u32) = (640, 480);

fn engine_with_band() -> Engine {
    let mut engine = Engine::new();
    engine.load_image(IMAGE, VIEWPORT).unwrap();

    engine.set_mode(ToolMode::Draw).unwrap();
    engine.pointer_pressed(Point2::new(100.0, 100.0)).unwrap();
    let line = engine
        .pointer_released(Point2::new(100.0, 200.0))
        .unwrap()
        .expect("release in draw mode creates a line");
    assert_eq!(line.length, 100.0);

    engine.mark_width(0.25).unwrap();
    engine.generate().unwrap();
    engine
}

#[test]
fn full_annotation_round_trip() {
    let mut engine = engine_with_band();

    // Fine-tune: push the quality down in a corner far from the band.
    engine
        .set_mode(ToolMode::FineTune(PaintMode::Increase))
        .unwrap();
    engine.pointer_pressed(Point2::new(600.0, 40.0)).unwrap();
    let painted = engine.session().unwrap().heatmaps().quality.get(300, 20);
    assert!(painted > 0.0);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grasp_labels.dat");
    engine.export_labels(&path).unwrap();

    // File size: 640 * 480 * 3 channels * 4 bytes.
    let meta = std::fs::metadata(&path).unwrap();
    assert_eq!(meta.len(), 640 * 480 * 3 * 4);

    let labels = read_labels(&path, IMAGE).unwrap();
    // The band survives the upsample: full-resolution pixel on the axis.
    let q = labels.quality.get(100, 150);
    assert!(q > 0.9, "axis quality after upsample: {q}");
    let w = labels.width.get(100, 150);
    assert!((w - 25.0).abs() < 0.5, "width channel: {w}");
    let a = labels.angle.get(100, 150);
    assert!((a + 90.0).abs() < 0.5, "angle channel: {a}");

    // Off-band pixels stay empty.
    assert_eq!(labels.quality.get(400, 50), 0.0);
}

#[test]
fn preview_rgb_buffers_have_display_shape() {
    let engine = engine_with_band();
    let maps = engine.session().unwrap().heatmaps();
    assert_eq!(maps.width_px(), 320);
    assert_eq!(maps.height_px(), 240);

    for kind in [MapKind::Quality, MapKind::Angle, MapKind::Width] {
        let rgb = grasp_annot::map_to_rgb(
            match kind {
                MapKind::Quality => &maps.quality,
                MapKind::Angle => &maps.angle,
                MapKind::Width => &maps.width,
            },
            kind,
        );
        assert_eq!(rgb.len(), 320 * 240 * 3);
    }
}

#[test]
fn regenerating_discards_fine_tune_edits() {
    let mut engine = engine_with_band();
    engine
        .set_mode(ToolMode::FineTune(PaintMode::Decrease))
        .unwrap();
    // Stamp down the centerline of the band.
    engine.pointer_pressed(Point2::new(100.0, 150.0)).unwrap();
    let edited = engine.session().unwrap().heatmaps().quality.get(50, 75);
    assert!(edited < 1.0);

    engine.generate().unwrap();
    let regenerated = engine.session().unwrap().heatmaps().quality.get(50, 75);
    assert!(regenerated > 0.95);
}
