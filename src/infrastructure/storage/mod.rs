pub mod memory;

pub use memory::InMemoryKeyValueStore;
