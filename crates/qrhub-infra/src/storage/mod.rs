//! Artifact store implementations - filesystem and in-memory.

mod fs;
mod memory;

pub use fs::FileSystemQrStorage;
pub use memory::InMemoryQrStorage;
