use crate::grid::Grid;
use crate::prng::Prng;

/// User-supplied table shape and tick rate, before sanitation.
///
/// Rows and cols come from free-form numeric input, so they are signed here
/// and clamped to zero on the way in. A non-positive (or non-finite)
/// frequency means the ticker is disabled, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedConfig {
    pub rows: i64,
    pub cols: i64,
    pub freq_hz: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        // A 10x3 table updating once per second.
        Self {
            rows: 10,
            cols: 3,
            freq_hz: 1.0,
        }
    }
}

impl FeedConfig {
    pub fn new(rows: i64, cols: i64, freq_hz: f64) -> Self {
        Self {
            rows,
            cols,
            freq_hz,
        }
    }

    /// Negative input clamps to an empty dimension.
    pub fn rows(&self) -> usize {
        self.rows.max(0) as usize
    }

    pub fn cols(&self) -> usize {
        self.cols.max(0) as usize
    }

    pub fn ticker_enabled(&self) -> bool {
        self.freq_hz.is_finite() && self.freq_hz > 0.0
    }
}

/// Simulated live data feed over a bounded numeric grid.
///
/// Each tick bumps the revision and stamps it into one uniformly random cell
/// per column, so a consumer diffing snapshots sees `cols` cells change.
/// The revision is a logical counter (not a timestamp): it doubles as the
/// liveness marker value and makes seeded runs fully deterministic.
#[derive(Debug, Clone)]
pub struct Feed {
    grid: Grid<u64>,
    revision: u64,
    rng: Prng,
}

impl Feed {
    pub fn new(rows: usize, cols: usize, seed: u64) -> Self {
        Self {
            grid: Grid::zeroed(rows, cols),
            revision: 0,
            rng: Prng::new(seed),
        }
    }

    pub fn from_config(cfg: &FeedConfig, seed: u64) -> Self {
        Self::new(cfg.rows(), cfg.cols(), seed)
    }

    pub fn grid(&self) -> &Grid<u64> {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// How many ticks have landed since (re)construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get_or(&self, i: usize, j: usize, fallback: u64) -> u64 {
        self.grid.get_or(i, j, fallback)
    }

    /// One randomized batch update: per column, stamp the new revision into a
    /// uniformly random row. Rows may repeat across columns and across ticks.
    ///
    /// No-op on an empty grid (the revision does not advance). Returns the
    /// revision after the tick.
    pub fn tick(&mut self) -> u64 {
        if self.grid.is_empty() {
            return self.revision;
        }

        self.revision += 1;
        for j in 0..self.grid.cols() {
            let i = self.rng.pick(self.grid.rows());
            self.grid.set(i, j, self.revision);
        }
        self.revision
    }

    /// Wholesale reconstruction: fresh zeroed grid of the new shape, revision
    /// back to zero. Nothing from the old grid survives.
    pub fn reconfigure(&mut self, rows: usize, cols: usize) {
        self.grid = self.grid.resized(rows, cols);
        self.revision = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_negative_dimensions() {
        let cfg = FeedConfig::new(-3, -1, 1.0);
        assert_eq!(cfg.rows(), 0);
        assert_eq!(cfg.cols(), 0);
        let feed = Feed::from_config(&cfg, 1);
        assert!(feed.grid().is_empty());
    }

    #[test]
    fn config_disables_ticker_on_bad_frequency() {
        assert!(FeedConfig::new(10, 3, 1.0).ticker_enabled());
        assert!(!FeedConfig::new(10, 3, 0.0).ticker_enabled());
        assert!(!FeedConfig::new(10, 3, -2.5).ticker_enabled());
        assert!(!FeedConfig::new(10, 3, f64::NAN).ticker_enabled());
        assert!(!FeedConfig::new(10, 3, f64::INFINITY).ticker_enabled());
    }

    #[test]
    fn tick_touches_one_cell_per_column() {
        let mut feed = Feed::new(8, 5, 123);
        feed.tick();

        assert_eq!(feed.revision(), 1);
        for j in 0..5 {
            let stamped = (0..8).filter(|&i| feed.get_or(i, j, 0) == 1).count();
            assert_eq!(stamped, 1, "column {j} must get exactly one write");
        }
        // Everything else keeps its prior value.
        let zeros = feed.grid().cells().iter().filter(|&&c| c == 0).count();
        assert_eq!(zeros, 8 * 5 - 5);
    }

    #[test]
    fn untouched_cells_keep_prior_values() {
        let mut feed = Feed::new(6, 4, 99);
        for _ in 0..10 {
            feed.tick();
        }
        let before: Vec<u64> = feed.grid().cells().to_vec();
        let rev = feed.tick();

        let mut changed_per_col = vec![0usize; 4];
        for i in 0..6 {
            for j in 0..4 {
                let now = feed.get_or(i, j, 0);
                if now != before[i * 4 + j] {
                    assert_eq!(now, rev);
                    changed_per_col[j] += 1;
                }
            }
        }
        // The new revision differs from every prior stamp, so each column
        // shows exactly one changed cell.
        assert!(changed_per_col.iter().all(|&n| n == 1));
    }

    #[test]
    fn tick_is_a_noop_on_empty_grids() {
        let mut feed = Feed::new(0, 4, 5);
        assert_eq!(feed.tick(), 0);
        assert_eq!(feed.revision(), 0);

        let mut feed = Feed::new(4, 0, 5);
        assert_eq!(feed.tick(), 0);
        assert_eq!(feed.revision(), 0);
    }

    #[test]
    fn seeded_ticks_are_deterministic() {
        let mut a = Feed::new(12, 7, 2024);
        let mut b = Feed::new(12, 7, 2024);
        for _ in 0..20 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.revision(), b.revision());
    }

    #[test]
    fn revision_is_monotonic_and_resets_on_reconfigure() {
        let mut feed = Feed::new(3, 3, 8);
        let mut last = 0;
        for _ in 0..5 {
            let rev = feed.tick();
            assert_eq!(rev, last + 1);
            last = rev;
        }

        feed.reconfigure(2, 2);
        assert_eq!(feed.revision(), 0);
        assert_eq!(feed.rows(), 2);
        assert_eq!(feed.cols(), 2);
        assert!(feed.grid().cells().iter().all(|&c| c == 0));
    }
}
