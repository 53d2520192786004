//! Frame identifier type.

use std::fmt;

/// Identifies a frame in the buffer pool.
///
/// Frames live in a fixed `Vec`, and the replacer keys its per-frame state
/// by the same index, so the id is a plain `usize`.
///
/// # Example
/// ```
/// use bufcore::FrameId;
///
/// let frame_id = FrameId::new(5);
/// assert_eq!(frame_id.index(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub usize);

impl FrameId {
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }

    /// Position of this frame in a frame-indexed table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for FrameId {
    fn from(id: usize) -> Self {
        FrameId(id)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
