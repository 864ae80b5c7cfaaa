//! Dropping of leading frames.

/// Drop the first `offset` frames. Dropping more frames than exist leaves
/// nothing.
pub fn apply_offset<T>(frames: Vec<T>, offset: usize) -> Vec<T> {
    if offset == 0 {
        return frames;
    }
    frames.into_iter().skip(offset).collect()
}
