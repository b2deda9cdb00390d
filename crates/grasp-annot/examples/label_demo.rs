//! Scripted annotation session without a GUI: draws two grasp axes on a
//! virtual 640x480 image, marks their widths, synthesizes the heatmaps and
//! writes the label file plus a JSON copy of the annotations.
//!
//! Usage: `cargo run --example label_demo [output_dir]`

use std::{env, path::PathBuf};

use log::{info, LevelFilter};
use nalgebra::Point2;

use grasp_annot::core::init_with_level;
use grasp_annot::{AnnotationFile, Engine, ToolMode};

const IMAGE: (u32, u32) = (640, 480);
const VIEWPORT: (u32, u32) = (640, 480);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug)?;

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut engine = Engine::new();
    engine.load_image(IMAGE, VIEWPORT)?;

    draw(&mut engine, (120.0, 140.0), (260.0, 180.0), 0.3)?;
    draw(&mut engine, (400.0, 120.0), (420.0, 320.0), 0.2)?;

    let maps = engine.generate()?;
    let peak = maps.quality.data.iter().cloned().fold(0.0f32, f32::max);
    info!("peak quality after synthesis: {peak:.3}");

    let label_path = out_dir.join("label_demo.dat");
    engine.export_labels(&label_path)?;
    info!("label file: {}", label_path.display());

    let session = engine.session()?;
    let doc = AnnotationFile::new(IMAGE, session.annotations().clone());
    let json_path = out_dir.join("label_demo.json");
    doc.write_json(&json_path)?;
    info!("annotations: {}", json_path.display());

    for seg in session.overlay() {
        info!(
            "overlay {:?} ({:.0},{:.0})-({:.0},{:.0}) selected={}",
            seg.kind,
            seg.segment.start.x,
            seg.segment.start.y,
            seg.segment.end.x,
            seg.segment.end.y,
            seg.selected
        );
    }

    Ok(())
}

fn draw(
    engine: &mut Engine,
    from: (f32, f32),
    to: (f32, f32),
    ratio: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    engine.set_mode(ToolMode::Draw)?;
    engine.pointer_pressed(Point2::new(from.0, from.1))?;
    engine.pointer_released(Point2::new(to.0, to.1))?;
    engine.mark_width(ratio)?;
    Ok(())
}
