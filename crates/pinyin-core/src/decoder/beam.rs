/// One DP cell: best cumulative score for `ch` at a position, and the index
/// of the predecessor cell in the previous position's beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DpCell<'a> {
    pub ch: &'a str,
    pub score: f64,
    /// `None` at position 0, or when the previous beam was empty.
    pub prev: Option<usize>,
}

/// Cells kept at one position, sorted by descending score.
///
/// Sorting is stable, so equal scores keep evaluation order. Once built, a
/// beam is never reordered: `DpCell::prev` of the next position indexes into
/// it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Beam<'a> {
    cells: Vec<DpCell<'a>>,
}

impl<'a> Beam<'a> {
    /// Sort `cells` best-first and keep the top `width`.
    pub fn pruned(mut cells: Vec<DpCell<'a>>, width: usize) -> Self {
        cells.sort_by(|a, b| b.score.total_cmp(&a.score));
        cells.truncate(width);
        Self { cells }
    }

    pub fn cells(&self) -> &[DpCell<'a>] {
        &self.cells
    }

    /// Highest-scoring cell (first seen among equals).
    pub fn best(&self) -> Option<&DpCell<'a>> {
        self.cells.first()
    }

    pub fn get(&self, idx: usize) -> Option<&DpCell<'a>> {
        self.cells.get(idx)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
