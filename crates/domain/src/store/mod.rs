//! Draft store implementations.

mod memory;

pub use memory::InMemoryDraftStore;
