pub mod directory_blocklist_store;
pub mod memory_blocklist_store;

pub use directory_blocklist_store::DirectoryBlocklistStore;
pub use memory_blocklist_store::MemoryBlocklistStore;
