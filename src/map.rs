use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxiMapError {
    #[error("map needs a top border, at least one cell row and a bottom border, got {0} rows")]
    TooFewRows(usize),

    #[error("map row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("map width {0} is not of the form 2*cols + 1")]
    BadWidth(usize),

    #[error("malformed border row {0}: expected '+---...---+'")]
    BadBorder(usize),

    #[error("map row {row} must start and end with '|'")]
    UnterminatedRow { row: usize },

    #[error("bad marker {marker:?} east of cell ({row}, {col}): expected ':' or '|'")]
    BadMarker { row: usize, col: usize, marker: char },
}

/// Static grid description parsed from the ASCII art map format:
/// a `+---+` border, `|` for a wall between horizontally adjacent cells
/// and `:` for a passage. Walls only ever separate columns; vertical
/// movement is clamped at the grid edge and never wall-blocked. That
/// asymmetry is inherited from the base taxi problem and is kept as is.
#[derive(Debug, Clone)]
pub struct TaxiMap {
    desc: Vec<Vec<char>>,
    east_open: Vec<Vec<bool>>,
    n_rows: usize,
    n_cols: usize,
}

impl TaxiMap {
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, TaxiMapError> {
        if lines.len() < 3 {
            return Err(TaxiMapError::TooFewRows(lines.len()));
        }

        let desc: Vec<Vec<char>> = lines
            .iter()
            .map(|l| l.as_ref().chars().collect())
            .collect();

        let width = desc[0].len();
        if let Some(row) = desc.iter().position(|l| l.len() != width) {
            return Err(TaxiMapError::RaggedRow {
                row,
                width: desc[row].len(),
                expected: width,
            });
        }
        if width < 3 || width % 2 == 0 {
            return Err(TaxiMapError::BadWidth(width));
        }

        let n_rows = desc.len() - 2;
        let n_cols = (width - 1) / 2;

        for &row in &[0, desc.len() - 1] {
            let line = &desc[row];
            let border_ok = line[0] == '+'
                && line[width - 1] == '+'
                && line[1..width - 1].iter().all(|&c| c == '-');
            if !border_ok {
                return Err(TaxiMapError::BadBorder(row));
            }
        }

        let mut east_open = vec![vec![false; n_cols.saturating_sub(1)]; n_rows];
        for row in 0..n_rows {
            let line = &desc[1 + row];
            if line[0] != '|' || line[width - 1] != '|' {
                return Err(TaxiMapError::UnterminatedRow { row });
            }
            for col in 0..n_cols - 1 {
                match line[2 * col + 2] {
                    ':' => east_open[row][col] = true,
                    '|' => east_open[row][col] = false,
                    marker => return Err(TaxiMapError::BadMarker { row, col, marker }),
                }
            }
        }

        Ok(Self {
            desc,
            east_open,
            n_rows,
            n_cols,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// True iff the boundary immediately east of (row, col) is passable.
    /// Always false on the east grid edge. Out-of-range cells are a
    /// programming error, not a recoverable condition.
    pub fn can_move_east(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.n_rows && col < self.n_cols);
        col + 1 < self.n_cols && self.east_open[row][col]
    }

    /// Mirror of [`Self::can_move_east`]; always false on the west edge.
    pub fn can_move_west(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.n_rows && col < self.n_cols);
        col > 0 && self.east_open[row][col - 1]
    }

    /// Raw map characters including the border rows, for rendering.
    pub fn desc(&self) -> &[Vec<char>] {
        &self.desc
    }

    pub(crate) fn set_cell(&mut self, row: usize, col: usize, marker: char) {
        self.desc[1 + row][2 * col + 1] = marker;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EXTENDED_MAP;
    use rstest::rstest;

    #[test]
    fn parses_the_extended_map() {
        let map = TaxiMap::parse(&EXTENDED_MAP).unwrap();
        assert_eq!(map.n_rows(), 16);
        assert_eq!(map.n_cols(), 16);
    }

    #[rstest]
    // row 0 of the extended map reads "| : | : : ...": wall east of col 1.
    #[case(0, 0, true)]
    #[case(0, 1, false)]
    // row 3 reads "| | : | : ... | ...": walls east of cols 0, 2 and 8.
    #[case(3, 0, false)]
    #[case(3, 1, true)]
    #[case(3, 2, false)]
    #[case(3, 8, false)]
    // east grid edge.
    #[case(0, 15, false)]
    fn east_walls(#[case] row: usize, #[case] col: usize, #[case] open: bool) {
        let map = TaxiMap::parse(&EXTENDED_MAP).unwrap();
        assert_eq!(map.can_move_east(row, col), open);
    }

    #[test]
    fn west_mirrors_east() {
        let map = TaxiMap::parse(&EXTENDED_MAP).unwrap();
        for row in 0..map.n_rows() {
            assert!(!map.can_move_west(row, 0));
            for col in 0..map.n_cols() - 1 {
                assert_eq!(map.can_move_east(row, col), map.can_move_west(row, col + 1));
            }
        }
    }

    #[test]
    fn rejects_too_few_rows() {
        let err = TaxiMap::parse(&["+-+", "+-+"]).unwrap_err();
        assert_eq!(err, TaxiMapError::TooFewRows(2));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = TaxiMap::parse(&["+---+", "| : |", "| :  |", "+---+"]).unwrap_err();
        assert_eq!(
            err,
            TaxiMapError::RaggedRow {
                row: 2,
                width: 6,
                expected: 5
            }
        );
    }

    #[test]
    fn rejects_even_width() {
        let err = TaxiMap::parse(&["+--+", "|  |", "+--+"]).unwrap_err();
        assert_eq!(err, TaxiMapError::BadWidth(4));
    }

    #[test]
    fn rejects_bad_border() {
        let err = TaxiMap::parse(&["+-:-+", "| : |", "+---+"]).unwrap_err();
        assert_eq!(err, TaxiMapError::BadBorder(0));
    }

    #[test]
    fn rejects_unknown_markers() {
        let err = TaxiMap::parse(&["+---+", "| ; |", "+---+"]).unwrap_err();
        assert_eq!(
            err,
            TaxiMapError::BadMarker {
                row: 0,
                col: 0,
                marker: ';'
            }
        );
    }

    #[test]
    fn rejects_rows_not_walled_in() {
        let err = TaxiMap::parse(&["+---+", ": : |", "+---+"]).unwrap_err();
        assert_eq!(err, TaxiMapError::UnterminatedRow { row: 0 });
    }
}
