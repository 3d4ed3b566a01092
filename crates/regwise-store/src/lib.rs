//! # regwise-store
//!
//! In-memory storage for knowledge chunks and regulatory requirements.
//!
//! - `ChunkStore`: id, concept and insertion-order indices behind one lock.
//! - `RequirementStore`: weighted keyword search over structured requirements.
//! - `datasets`: compiled-in framework data.
//! - `loader`: line-delimited and JSON-array external sources.

pub mod chunk_store;
pub mod datasets;
pub mod frameworks;
pub mod loader;
pub mod requirements;

pub use chunk_store::{BatchReport, ChunkStore};
pub use datasets::{SampleResponseBook, StaticDatasets};
pub use frameworks::FrameworkRegistry;
pub use loader::{load_external, ExternalLoad};
pub use requirements::{RequirementMatch, RequirementStore};
