//! Media Adapters - VideoPayload implementations.
//!
//! - **LocalVideoFile** - A video on the local filesystem, read range by range
//! - **InMemoryVideo** - Bytes held in memory (testing)

mod in_memory;
mod local_file;

pub use in_memory::InMemoryVideo;
pub use local_file::LocalVideoFile;
