use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use reel_animation::{TweenAPI, easing};
use reel_ids::{NodeID, TextureID};
use reel_nodes::{Node2D, NodeBehavior, Shape2D, Sprite2D, Stage, behavior_any};
use reel_runtime::{ExportSettings, FrameExporter, FrameInfo, RecordingSurface};
use reel_structs::{Color, Transform2D, Vector2};
use reel_timeline::TimelineManager;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

/// Rotates its node at a fixed rate.
struct Spin {
    degrees_per_second: f32,
}

impl NodeBehavior for Spin {
    fn on_process(&mut self, stage: &mut Stage, id: NodeID, delta: f32) {
        let step = self.degrees_per_second * delta;
        stage.with_transform_mut(id, |t| t.rotation = (t.rotation + step) % 360.0);
    }

    behavior_any!();
}

fn center() -> Vector2 {
    Vector2::new(WIDTH as f32 * 0.5, HEIGHT as f32 * 0.5)
}

/// Title card: a panel slides in while the logo fades up.
fn build_intro(stage: &mut Stage) -> Result<NodeID> {
    let root = stage.create_node(
        "Intro",
        Node2D::with_transform(Transform2D::new(center(), 0.0, Vector2::ONE)),
    );

    let mut panel = Shape2D::rectangle(Vector2::new(400.0, 120.0), Color::rgb(30, 60, 120));
    panel.transform.position = Vector2::new(-(WIDTH as f32), 0.0);
    let panel = stage.create_node("Panel", panel);
    stage.add_child(root, panel)?;

    let mut logo = Sprite2D::new(TextureID::from_name("logo.png"), Vector2::new(96.0, 96.0));
    logo.modulate = Color::TRANSPARENT;
    let logo = stage.create_node("Logo", logo);
    stage.add_child(panel, logo)?;

    let tween = stage.create_tween(root)?;
    stage.tween_node_property(
        tween,
        panel,
        "position",
        Vector2::ZERO,
        0.8,
        0.0,
        easing::cubic_out,
    )?;
    stage.tween_node_property(
        tween,
        logo,
        "modulate",
        Color::WHITE,
        0.6,
        0.6,
        easing::sine_in_out,
    )?;
    stage.start_tween(tween)?;
    Ok(root)
}

/// A spinning badge that pops in and scales back down.
fn build_badge(stage: &mut Stage) -> Result<NodeID> {
    let mut badge = Shape2D::circle(48.0, Color::rgb(240, 180, 40));
    badge.transform.position = center();
    badge.transform.scale = Vector2::ZERO;
    let root = stage.create_node_with_behavior(
        "Badge",
        badge,
        Box::new(Spin {
            degrees_per_second: 90.0,
        }),
    );

    let tween = stage.create_tween(root)?;
    stage.tween_node_property(tween, root, "scale", Vector2::ONE, 0.5, 0.0, easing::back_out)?;
    stage.tween_node_property(tween, root, "scale", Vector2::ZERO, 0.4, 1.2, easing::quad_in)?;
    stage.start_tween(tween)?;
    Ok(root)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config: Option<PathBuf> = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let settings = match &config {
        Some(path) => ExportSettings::load(path)?,
        None => ExportSettings::default(),
    };
    let env = env_logger::Env::default().default_filter_or(settings.log_filter());
    env_logger::Builder::from_env(env).init();

    let mut stage = Stage::new();
    let intro = build_intro(&mut stage).context("building intro scene")?;
    let badge = build_badge(&mut stage).context("building badge scene")?;

    let mut timeline = TimelineManager::new(WIDTH, HEIGHT, Color::rgb(12, 12, 16));
    timeline.add_scene(intro, 0.0, 2.0)?;
    timeline.add_scene(badge, 1.5, 2.0)?;
    info!("timeline: {} scenes, {:.2}s", timeline.len(), timeline.total_duration());

    let mut exporter = FrameExporter::new(settings)?;
    let mut surface = RecordingSurface::new();
    let fps = exporter.settings().fps();
    let mut sink = |frame: &FrameInfo, surface: &RecordingSurface| -> Result<()> {
        println!(
            "frame {:>4}  t={:>6.3}s  roots={}  primitives={}",
            frame.index,
            frame.time,
            frame.active_roots.len(),
            surface.primitive_count()
        );
        Ok(())
    };
    let summary = exporter.export(&mut stage, &timeline, &mut surface, &mut sink)?;

    println!(
        "exported {} frames at {fps} fps, {} scenes ended early",
        summary.frames,
        summary.dropped_roots.len()
    );
    Ok(())
}
