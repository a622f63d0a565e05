mod error;
mod storage;
mod storage_json;
mod storage_memory;

pub use error::StorageError;
pub use storage::KeyValueStorage;
pub use storage_json::JsonFileStorage;
pub use storage_memory::MemoryStorage;
