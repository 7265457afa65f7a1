//! Threading configuration for root-parallel search.
//!
//! Root moves are split into contiguous chunks, one per worker. Each worker
//! owns a clone of the game, so nothing mutable is shared between threads.

use std::ops::Range;

/// Search execution model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadingModel {
    SingleThreaded,
    /// Root moves scored on scoped worker threads, merged in root order.
    RootSplit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub model: ThreadingModel,
    pub requested_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            model: ThreadingModel::SingleThreaded,
            requested_threads: 1,
        }
    }
}

impl ThreadingConfig {
    pub fn root_split(threads: usize) -> Self {
        Self {
            model: ThreadingModel::RootSplit,
            requested_threads: threads,
        }
    }

    #[inline]
    pub fn normalized_threads(self) -> usize {
        self.requested_threads.max(1)
    }

    #[inline]
    pub fn is_parallel(self) -> bool {
        self.model == ThreadingModel::RootSplit && self.normalized_threads() > 1
    }
}

/// Splits `0..len` into at most `workers` contiguous, non-empty ranges of
/// near-equal size, in order.
pub fn chunk_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1).min(len.max(1));
    let base = len / workers;
    let extra = len % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let size = base + usize::from(worker < extra);
        if size == 0 {
            break;
        }
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_threaded() {
        let config = ThreadingConfig::default();
        assert!(!config.is_parallel());
        assert!(!ThreadingConfig::root_split(1).is_parallel());
        assert!(ThreadingConfig::root_split(4).is_parallel());
        assert_eq!(ThreadingConfig::root_split(0).normalized_threads(), 1);
    }

    #[test]
    fn chunks_cover_everything_in_order() {
        assert_eq!(chunk_ranges(10, 3), vec![0..4, 4..7, 7..10]);
        assert_eq!(chunk_ranges(2, 8), vec![0..1, 1..2]);
        assert!(chunk_ranges(0, 4).is_empty());
    }
}
