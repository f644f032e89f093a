mod exporter;
mod recording;
mod settings;

pub use exporter::{ExportSummary, FrameExporter, FrameInfo, FrameSink};
pub use recording::{DrawCommand, RecordingSurface};
pub use settings::{
    DEFAULT_FPS, DEFAULT_LOG_FILTER, ExportSection, ExportSettings, LoggingSection,
};
