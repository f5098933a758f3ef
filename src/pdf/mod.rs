//! Document codec built on lopdf
//!
//! Reading sources, copying pages into an output document, overlaying a
//! watermark page and serializing the result.

pub mod accumulator;
pub mod overlay;
pub mod source;
pub mod stamp;

// Re-export commonly used items
pub use accumulator::{ImportedDocument, OutputAccumulator};
pub use overlay::Overlay;
pub use source::SourceDocument;
pub use stamp::text_stamp;
