mod timeline;

pub use timeline::{TimelineEntry, TimelineError, TimelineManager};
