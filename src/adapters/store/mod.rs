//! Profile-store adapters that do not need the real document store.

mod in_memory;

pub use in_memory::InMemoryProfileStore;
