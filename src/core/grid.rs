/// Dense row-major 2-D container with bounds-safe fallback reads.
///
/// The grid is fixed-size: dimensions are set at construction (or by
/// `resized`, which is equivalent to reconstruction) and every row has exactly
/// `cols` cells. Out-of-range reads go through `get_or`, which masks them with
/// a caller-supplied fallback instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Allocate `rows x cols` cells, all set to `value`.
    ///
    /// A zero-sized dimension yields an empty grid; reads on it fall back.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows.saturating_mul(cols)],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when either dimension is zero (no addressable cells).
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn in_bounds(&self, i: usize, j: usize) -> bool {
        i < self.rows && j < self.cols
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// In-bounds read.
    ///
    /// Panics on out-of-range indices; callers needing safety use `get_or`.
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(self.in_bounds(i, j), "grid read out of bounds");
        self.cells[self.idx(i, j)]
    }

    /// The safe accessor: stored value if `(i, j)` is in bounds, else `fallback`.
    pub fn get_or(&self, i: usize, j: usize, fallback: T) -> T {
        if self.in_bounds(i, j) {
            self.cells[self.idx(i, j)]
        } else {
            fallback
        }
    }

    /// Overwrite a single cell. Panics out of bounds; only the controlled
    /// update routine and bounds-checked callers write here.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        assert!(self.in_bounds(i, j), "grid write out of bounds");
        let idx = self.idx(i, j);
        self.cells[idx] = value;
    }

    /// Row-major view of the raw cells.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl<T: Copy + Default> Grid<T> {
    /// `filled` with the type's zero value.
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }

    /// Fresh zeroed grid of the requested shape. The receiver is untouched;
    /// no contents carry over.
    pub fn resized(&self, rows: usize, cols: usize) -> Self {
        Self::zeroed(rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_sets_every_cell_regardless_of_fallback() {
        let g = Grid::filled(3, 4, 7i64);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(g.get_or(i, j, -1), 7);
                assert_eq!(g.get_or(i, j, 99), 7);
            }
        }
    }

    #[test]
    fn out_of_bounds_reads_fall_back() {
        let g = Grid::zeroed(3, 2);
        assert_eq!(g.get_or(3, 0, -1i64), -1);
        assert_eq!(g.get_or(0, 2, -1), -1);
        assert_eq!(g.get_or(usize::MAX, usize::MAX, -1), -1);

        let empty = Grid::<i64>::zeroed(0, 5);
        assert_eq!(empty.get_or(0, 0, 42), 42);
        let empty = Grid::<i64>::zeroed(5, 0);
        assert_eq!(empty.get_or(2, 0, 42), 42);
    }

    #[test]
    fn resized_is_fully_zeroed() {
        let mut g = Grid::zeroed(4, 4);
        for i in 0..4 {
            for j in 0..4 {
                g.set(i, j, 1i64);
            }
        }
        let r = g.resized(2, 6);
        assert_eq!(r.rows(), 2);
        assert_eq!(r.cols(), 6);
        assert!(r.cells().iter().all(|&c| c == 0));
        // Receiver unchanged.
        assert_eq!(g.get(3, 3), 1);
    }

    #[test]
    fn set_overwrites_exactly_one_cell() {
        let mut g = Grid::zeroed(3, 3);
        g.set(1, 2, 5i64);
        assert_eq!(g.get(1, 2), 5);
        let touched = g.cells().iter().filter(|&&c| c != 0).count();
        assert_eq!(touched, 1);
    }

    #[test]
    fn masked_read_then_write_then_reset() {
        // 3x2 of zeros; far OOB read falls back; a write sticks; resize resets.
        let mut g = Grid::zeroed(3, 2);
        assert_eq!(g.get_or(5, 5, -1i64), -1);
        g.set(1, 1, 42);
        assert_eq!(g.get_or(1, 1, 0), 42);
        let g = g.resized(2, 2);
        assert_eq!(g.get_or(1, 1, 0), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_panics_out_of_bounds() {
        let g = Grid::<u64>::zeroed(2, 2);
        let _ = g.get(2, 0);
    }
}
