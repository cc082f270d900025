pub mod memory;

pub use memory::InMemoryPendingInputs;
