use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use log::{debug, error, info, warn};
use reel_ids::{NodeID, TreeID};
use reel_nodes::{DrawSurface, FrameStatus, Stage};
use reel_timeline::TimelineManager;
use rustc_hash::FxBuildHasher;

use crate::settings::ExportSettings;

/// Describes the frame handed to a `FrameSink`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInfo {
    pub index: usize,
    pub time: f32,
    pub width: u32,
    pub height: u32,
    /// Roots drawn into this frame, in draw order.
    pub active_roots: Vec<NodeID>,
}

/// Receives each finished frame. Closures of the matching shape are sinks.
pub trait FrameSink<S> {
    fn write_frame(&mut self, info: &FrameInfo, surface: &S) -> Result<()>;
}

impl<S, F> FrameSink<S> for F
where
    F: FnMut(&FrameInfo, &S) -> Result<()>,
{
    fn write_frame(&mut self, info: &FrameInfo, surface: &S) -> Result<()> {
        self(info, surface)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportSummary {
    pub frames: usize,
    /// Roots that stopped taking part before their window ended.
    pub dropped_roots: Vec<NodeID>,
}

#[derive(Clone, Copy, Debug)]
struct LiveScene {
    tree: TreeID,
    activated: usize,
}

/// Drives a `TimelineManager` frame by frame: owns the scene trees of the
/// active roots, runs their logic and draw passes, and passes the result on.
pub struct FrameExporter {
    settings: ExportSettings,
    live: IndexMap<NodeID, LiveScene, FxBuildHasher>,
    dropped: IndexSet<NodeID, FxBuildHasher>,
}

impl FrameExporter {
    pub fn new(settings: ExportSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            live: IndexMap::default(),
            dropped: IndexSet::default(),
        })
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Tree currently running `root`, if it is live.
    pub fn tree_of_root(&self, root: NodeID) -> Option<TreeID> {
        self.live.get(&root).map(|scene| scene.tree)
    }

    pub fn live_roots(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.live.keys().copied()
    }

    pub fn dropped_roots(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.dropped.iter().copied()
    }

    /// Export the configured frame range into `sink`. Every tree the
    /// exporter created is released before returning, on success or error.
    pub fn export<S, K>(
        &mut self,
        stage: &mut Stage,
        timeline: &TimelineManager,
        surface: &mut S,
        sink: &mut K,
    ) -> Result<ExportSummary>
    where
        S: DrawSurface,
        K: FrameSink<S>,
    {
        let result = self.export_range(stage, timeline, surface, sink);
        self.finish(stage);
        result
    }

    fn export_range<S, K>(
        &mut self,
        stage: &mut Stage,
        timeline: &TimelineManager,
        surface: &mut S,
        sink: &mut K,
    ) -> Result<ExportSummary>
    where
        S: DrawSurface,
        K: FrameSink<S>,
    {
        let range = self.settings.frame_range(timeline)?;
        info!(
            "exporting frames {}..{} at {} fps ({}x{})",
            range.start,
            range.end,
            self.settings.fps(),
            timeline.width(),
            timeline.height()
        );

        let mut frames = 0;
        for index in range {
            let info = self.render_frame(stage, timeline, index, surface)?;
            if let Err(e) = sink.write_frame(&info, surface) {
                error!("frame {index}: sink failed: {e:#}");
                return Err(e.context(format!("writing frame {index}")));
            }
            frames += 1;
        }

        info!("exported {frames} frames");
        Ok(ExportSummary {
            frames,
            dropped_roots: self.dropped.iter().copied().collect(),
        })
    }

    /// Bring the scene trees in line with time of frame `index`, run one
    /// logic pass on each, then clear `surface` and draw them in timeline
    /// order.
    pub fn render_frame<S: DrawSurface>(
        &mut self,
        stage: &mut Stage,
        timeline: &TimelineManager,
        index: usize,
        surface: &mut S,
    ) -> Result<FrameInfo> {
        let fps = self.settings.fps();
        let time = timeline.frame_time(index, fps)?;
        let active: Vec<NodeID> = timeline
            .get_active_scene_roots(time)
            .into_iter()
            .filter(|root| !self.dropped.contains(root))
            .collect();

        self.release_inactive(stage, &active);

        let mut drawn = Vec::with_capacity(active.len());
        for root in active {
            let Some(scene) = self.activate(stage, root, index) else {
                continue;
            };
            let delta = if scene.activated == index { 0.0 } else { 1.0 / fps };
            match stage.process_frame(scene.tree, delta) {
                Ok(FrameStatus::RootFreed) => {
                    info!("frame {index}: root {root} was freed, dropping it");
                    self.drop_root(stage, root);
                }
                Ok(_) => drawn.push(root),
                Err(e) => {
                    warn!("frame {index}: {e}, dropping root {root}");
                    self.drop_root(stage, root);
                }
            }
        }

        surface.clear(timeline.background_color());
        for &root in &drawn {
            let Some(scene) = self.live.get(&root) else {
                continue;
            };
            stage
                .draw_frame(scene.tree, surface)
                .with_context(|| format!("drawing root {root} in frame {index}"))?;
        }

        debug!("frame {index} at {time:.3}s: {} roots drawn", drawn.len());
        Ok(FrameInfo {
            index,
            time,
            width: timeline.width(),
            height: timeline.height(),
            active_roots: drawn,
        })
    }

    /// Release every tree this exporter still holds.
    pub fn finish(&mut self, stage: &mut Stage) {
        for (root, scene) in self.live.drain(..) {
            if let Err(e) = stage.release_tree(scene.tree) {
                warn!("releasing tree of {root}: {e}");
            }
        }
    }

    fn release_inactive(&mut self, stage: &mut Stage, active: &[NodeID]) {
        let stale: Vec<NodeID> = self
            .live
            .keys()
            .filter(|root| !active.contains(root))
            .copied()
            .collect();
        for root in stale {
            if let Some(scene) = self.live.shift_remove(&root) {
                debug!("root {root} left the timeline, releasing tree {}", scene.tree);
                if let Err(e) = stage.release_tree(scene.tree) {
                    warn!("releasing tree of {root}: {e}");
                }
            }
        }
    }

    fn activate(&mut self, stage: &mut Stage, root: NodeID, index: usize) -> Option<LiveScene> {
        if let Some(scene) = self.live.get(&root) {
            return Some(*scene);
        }
        match stage.create_tree(root) {
            Ok(tree) => {
                debug!("frame {index}: root {root} activated as tree {tree}");
                let scene = LiveScene {
                    tree,
                    activated: index,
                };
                self.live.insert(root, scene);
                Some(scene)
            }
            Err(e) => {
                warn!("frame {index}: cannot activate root {root}: {e}");
                self.dropped.insert(root);
                None
            }
        }
    }

    fn drop_root(&mut self, stage: &mut Stage, root: NodeID) {
        if let Some(scene) = self.live.shift_remove(&root) {
            if let Err(e) = stage.release_tree(scene.tree) {
                warn!("releasing tree of {root}: {e}");
            }
        }
        self.dropped.insert(root);
    }
}
