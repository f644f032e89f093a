use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result, bail};
use reel_timeline::TimelineManager;
use serde::Deserialize;

pub const DEFAULT_FPS: f32 = 30.0;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Contents of an export config file. Every section and key is optional.
///
/// ```toml
/// [export]
/// fps = 60
/// start = 1.5
/// end = 4.0
///
/// [logging]
/// filter = "reel_nodes=debug"
/// ```
#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    pub export: ExportSection,
    pub logging: LoggingSection,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    pub fps: f32,
    /// First exported second. Defaults to the start of the timeline.
    pub start: Option<f32>,
    /// Exported range stops before this second. Defaults to the timeline end.
    pub end: Option<f32>,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            start: None,
            end: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    /// `env_logger` filter, used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading export settings {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("loading export settings {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: ExportSettings = toml::from_str(text).context("parsing export settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let ExportSection { fps, start, end } = self.export;
        if !(fps.is_finite() && fps > 0.0) {
            bail!("export.fps must be positive, got {fps}");
        }
        if let Some(start) = start {
            if !(start.is_finite() && start >= 0.0) {
                bail!("export.start must be a non-negative number of seconds, got {start}");
            }
        }
        if let Some(end) = end {
            if !end.is_finite() || end <= start.unwrap_or(0.0) {
                bail!("export.end must come after export.start, got {end}");
            }
        }
        Ok(())
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.export.fps
    }

    #[inline]
    pub fn log_filter(&self) -> &str {
        &self.logging.filter
    }

    /// Frame indices to export for `timeline`, clipped to `start`/`end`.
    pub fn frame_range(&self, timeline: &TimelineManager) -> Result<Range<usize>> {
        let fps = self.fps();
        let total = timeline.frame_count(fps)?;
        let to_frame = |seconds: f32| ((seconds * fps).ceil() as usize).min(total);

        let first = self.export.start.map_or(0, to_frame);
        let last = self.export.end.map_or(total, to_frame);
        Ok(first..last.max(first))
    }
}
