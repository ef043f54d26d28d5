//! Document reading
//!
//! Flow: `FileResource::open` validates a path, `StreamPlanner` picks bulk or
//! chunked reading from the file size, and `ContentExtractor` turns the file
//! into `TextUnit`s using the reader for its `DocumentFormat`.

pub mod extractor;
pub mod format;
mod formats;
pub mod planner;
pub mod resource;
pub mod text_unit;

pub use extractor::ContentExtractor;
pub use format::DocumentFormat;
pub use planner::{ExtractionStrategy, StreamPlanner};
pub use resource::FileResource;
pub use text_unit::{ChunkIndex, Provenance, TextStream, TextUnit};
