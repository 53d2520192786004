//! Error types for bufcore.
//!
//! None of these are fatal. The replacer's public operations are no-ops on
//! bad input, so these variants mostly travel from internal helpers up to a
//! log line. Construction is the only place a caller sees an `Err`.

use thiserror::Error;

use crate::common::FrameId;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in bufcore.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Frame id lies beyond the replacer's configured range.
    #[error("{frame_id} is out of range for replacer capacity {capacity}")]
    FrameOutOfRange { frame_id: FrameId, capacity: usize },

    /// The replacer has no access history for this frame.
    #[error("{0} is not tracked by the replacer")]
    FrameNotTracked(FrameId),

    /// The frame is pinned and may not be removed.
    #[error("{0} is not evictable")]
    FrameNotEvictable(FrameId),

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FrameOutOfRange {
            frame_id: FrameId::new(9),
            capacity: 4,
        };
        assert_eq!(
            err.to_string(),
            "Frame(9) is out of range for replacer capacity 4"
        );

        let err = Error::FrameNotEvictable(FrameId::new(3));
        assert_eq!(err.to_string(), "Frame(3) is not evictable");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::InvalidConfig("k must be at least 1".into());
        assert_eq!(err.to_string(), "invalid configuration: k must be at least 1");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail(ok: bool) -> Result<u32> {
            if ok {
                Ok(42)
            } else {
                Err(Error::FrameNotTracked(FrameId::new(0)))
            }
        }

        assert_eq!(might_fail(true), Ok(42));
        assert!(might_fail(false).is_err());
    }
}
