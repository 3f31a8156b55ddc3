//! Size limits TikTok enforces on uploaded videos.

use thiserror::Error;

const KIB: u64 = 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Smallest accepted upload (10 KiB).
pub const MIN_VIDEO_SIZE: u64 = 10 * KIB;

/// Largest accepted upload (4 GiB).
pub const MAX_VIDEO_SIZE: u64 = 4 * GIB;

/// A video file rejected before any upload request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaValidationError {
    #[error("File too large. Maximum is 4GB, your file is {:.2}GB.", in_gib(.size))]
    TooLarge { size: u64 },

    #[error("File too small ({:.1}KB). Please use a valid video file.", in_kib(.size))]
    TooSmall { size: u64 },
}

fn in_gib(size: &u64) -> f64 {
    *size as f64 / GIB as f64
}

fn in_kib(size: &u64) -> f64 {
    *size as f64 / KIB as f64
}

/// Checks a file size against TikTok's upload bounds.
pub fn validate_video_size(size: u64) -> Result<(), MediaValidationError> {
    if size > MAX_VIDEO_SIZE {
        return Err(MediaValidationError::TooLarge { size });
    }
    if size < MIN_VIDEO_SIZE {
        return Err(MediaValidationError::TooSmall { size });
    }
    Ok(())
}
