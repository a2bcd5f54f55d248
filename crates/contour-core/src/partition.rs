//! Work partitioning across a fixed set of workers.
//!
//! The same floor-division formula drives every phase, so a worker's share
//! of any domain is deterministic for a given worker count. Callers ensure
//! `workers >= 1`.

use std::ops::Range;

/// Half-open index range owned by worker `id` of `workers` over a domain
/// of `len` elements.
///
/// The ranges tile `[0, len)` exactly: no element is skipped or assigned
/// twice, and surplus workers (when `workers > len`) get empty ranges.
pub fn worker_range(id: usize, workers: usize, len: usize) -> Range<usize> {
    let start = id * len / workers;
    let end = ((id + 1) * len / workers).min(len);
    start..end
}

/// Ranges for all workers over a domain of `len` elements, in worker order.
pub fn worker_ranges(workers: usize, len: usize) -> Vec<Range<usize>> {
    (0..workers)
        .map(|id| worker_range(id, workers, len))
        .collect()
}

/// Split the leading `len * stride` elements of a flat slice into one
/// mutable chunk per worker, where domain index `i` owns the `stride`
/// elements starting at `i * stride`.
///
/// Chunk boundaries follow [`worker_ranges`], so chunks are disjoint and
/// in worker order; empty ranges yield empty chunks. Any slice tail beyond
/// `len * stride` belongs to no worker and is left alone.
pub fn split_rows_mut<T>(
    data: &mut [T],
    workers: usize,
    len: usize,
    stride: usize,
) -> Vec<&mut [T]> {
    let mut chunks = Vec::with_capacity(workers);
    let mut rest = data;

    for range in worker_ranges(workers, len) {
        let take = (range.end - range.start) * stride;
        let (chunk, tail) = rest.split_at_mut(take);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
