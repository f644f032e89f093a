use log::debug;
use reel_ids::NodeID;
use reel_structs::Color;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("invalid time window: start {start}, duration {duration}")]
    InvalidWindow { start: f32, duration: f32 },

    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFps(f32),
}

/// A scene root and the half-open window `[start, start + duration)` in
/// which it is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineEntry {
    pub root: NodeID,
    pub start: f32,
    pub duration: f32,
}

impl TimelineEntry {
    pub const fn new(root: NodeID, start: f32, duration: f32) -> Self {
        Self {
            root,
            start,
            duration,
        }
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    #[inline]
    pub fn is_active_at(&self, time: f32) -> bool {
        self.start <= time && time < self.end()
    }

    fn validate(&self) -> Result<(), TimelineError> {
        let valid = self.start.is_finite()
            && self.start >= 0.0
            && self.duration.is_finite()
            && self.duration > 0.0;
        if valid {
            Ok(())
        } else {
            Err(TimelineError::InvalidWindow {
                start: self.start,
                duration: self.duration,
            })
        }
    }
}

/// Registry of scene roots over time, plus the output frame format.
#[derive(Clone, Debug)]
pub struct TimelineManager {
    width: u32,
    height: u32,
    background: Color,
    entries: Vec<TimelineEntry>,
    total_duration: f32,
}

impl TimelineManager {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            entries: Vec::new(),
            total_duration: 0.0,
        }
    }

    /// Register an entry. Total duration grows to cover it and never shrinks.
    pub fn add_entry(&mut self, entry: TimelineEntry) -> Result<(), TimelineError> {
        entry.validate()?;
        self.total_duration = self.total_duration.max(entry.end());
        debug!(
            "timeline: {} active in [{}, {})",
            entry.root,
            entry.start,
            entry.end()
        );
        self.entries.push(entry);
        Ok(())
    }

    pub fn add_scene(
        &mut self,
        root: NodeID,
        start: f32,
        duration: f32,
    ) -> Result<(), TimelineError> {
        self.add_entry(TimelineEntry::new(root, start, duration))
    }

    /// Roots whose window contains `time`, in the order they were added.
    /// A root registered under several overlapping windows appears once.
    pub fn get_active_scene_roots(&self, time: f32) -> Vec<NodeID> {
        let mut roots: Vec<NodeID> = Vec::new();
        for entry in self.active_entries(time) {
            if !roots.contains(&entry.root) {
                roots.push(entry.root);
            }
        }
        roots
    }

    pub fn active_entries(&self, time: f32) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter().filter(move |e| e.is_active_at(time))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn background_color(&self) -> Color {
        self.background
    }

    #[inline]
    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frames needed to cover the total duration at `fps`.
    pub fn frame_count(&self, fps: f32) -> Result<usize, TimelineError> {
        check_fps(fps)?;
        Ok((self.total_duration * fps).ceil() as usize)
    }

    /// Timestamp of frame `index` at `fps`.
    pub fn frame_time(&self, index: usize, fps: f32) -> Result<f32, TimelineError> {
        check_fps(fps)?;
        Ok(index as f32 / fps)
    }
}

fn check_fps(fps: f32) -> Result<(), TimelineError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(())
    } else {
        Err(TimelineError::InvalidFps(fps))
    }
}
