mod collection;
mod error;
mod storage;

pub use collection::{CollectionStore, THREADS_KEY};
pub use error::StorageError;
pub use storage::{KeyValueStore, MemoryStore, Storage};
