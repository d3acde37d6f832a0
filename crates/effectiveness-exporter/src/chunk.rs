//! Fixed-size batching for rate-limited batch requests

use std::num::NonZeroUsize;

/// Split `items` into contiguous batches of `size`, the last one possibly shorter
pub fn chunk<T>(items: &[T], size: NonZeroUsize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.get())
}
