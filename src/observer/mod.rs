use crate::feed::Feed;

/// A read-only snapshot of the feed at one revision.
///
/// Design intent:
/// - Observers cannot mutate the feed.
/// - Snapshotting is *on-demand* and copies the cells; the tick path stays
///   unchanged.
/// - Derived views recompute from snapshots; freshness is decided by the
///   revision, not by comparing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub revision: u64,
    /// Row-major copy of the cells.
    pub cells: Vec<u64>,
}

impl FeedSnapshot {
    /// Same contract as the live grid's safe accessor.
    pub fn get_or(&self, i: usize, j: usize, fallback: u64) -> u64 {
        if i < self.rows && j < self.cols {
            self.cells[i * self.cols + j]
        } else {
            fallback
        }
    }

    pub fn row(&self, i: usize) -> Option<&[u64]> {
        if i < self.rows {
            Some(&self.cells[i * self.cols..(i + 1) * self.cols])
        } else {
            None
        }
    }
}

pub struct FeedAdapter<'a> {
    feed: &'a Feed,
}

impl<'a> FeedAdapter<'a> {
    pub fn new(feed: &'a Feed) -> Self {
        Self { feed }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            rows: self.feed.rows(),
            cols: self.feed.cols(),
            revision: self.feed.revision(),
            cells: self.feed.grid().cells().to_vec(),
        }
    }
}

/// Tracks the last revision an observer consumed.
///
/// `poll` hands out a snapshot only when the feed's revision moved since the
/// previous poll, so a render loop can poll faster than the tick rate without
/// recomputing identical views. The revision resets on reconstruction; any
/// change counts as fresh, not just increases.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevisionWatch {
    last_seen: u64,
}

impl RevisionWatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seen(&self) -> u64 {
        self.last_seen
    }

    pub fn is_fresh(&self, feed: &Feed) -> bool {
        feed.revision() != self.last_seen
    }

    pub fn poll(&mut self, feed: &Feed) -> Option<FeedSnapshot> {
        if !self.is_fresh(feed) {
            return None;
        }
        self.last_seen = feed.revision();
        Some(FeedAdapter::new(feed).snapshot())
    }
}
