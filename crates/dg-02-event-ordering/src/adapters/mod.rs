//! Adapters layer: concrete implementations of the outbound ports.

pub mod checks;
pub mod classifier;
pub mod memory;

pub use checks::OrderedChecks;
pub use classifier::BanClassifier;
pub use memory::InMemoryDag;
