//! Storage Adapters
//!
//! Implementations of the AccountStore port for persisting the account list.
//!
//! ## Available Adapters
//!
//! - **FileAccountStore** - Stores the list as one JSON file on disk
//! - **InMemoryAccountStore** - Keeps the serialized list in memory (testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileAccountStore, InMemoryAccountStore};
//!
//! // Production: file-based storage
//! let store = FileAccountStore::new("./data");
//!
//! // Testing: in-memory storage
//! let store = InMemoryAccountStore::new();
//! ```

mod file_account_store;
mod in_memory_account_store;

pub use file_account_store::FileAccountStore;
pub use in_memory_account_store::InMemoryAccountStore;
