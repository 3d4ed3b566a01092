pub mod taxonomy;

pub use taxonomy::QueryIntent;
