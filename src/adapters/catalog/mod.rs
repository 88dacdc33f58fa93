//! Catalog adapters that do not need the document store.

mod fixed;

pub use fixed::FixedTopicCatalog;
