//! Publish module - jobs, their lifecycle, and upload arithmetic.

mod chunk_plan;
mod errors;
mod job;
mod job_status;
mod media;

pub use chunk_plan::{ByteRange, ChunkPlan, MAX_CHUNK_SIZE};
pub use errors::{JobError, PublishError};
pub use job::{PublishJob, UploadSource, DEFAULT_COVER_TIMESTAMP_MS};
pub use job_status::JobStatus;
pub use media::{validate_video_size, MediaValidationError, MAX_VIDEO_SIZE, MIN_VIDEO_SIZE};
