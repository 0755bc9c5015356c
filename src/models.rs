//! Result types that move between the SQLite layer and the TUI. They stay
//! plain data holders so the presentation layer can render them without
//! touching the database again: every value is already text by the time it
//! lands here.

/// A fully materialized result set: column names plus every row rendered as
/// text. Used both for browsing a table and for displaying ad-hoc SELECT
/// output.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Column names in statement order, taken from the result metadata.
    pub columns: Vec<String>,
    /// One entry per row; each row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Number of materialized rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result set carried no rows at all. The column header may
    /// still be present (an empty table has columns but no rows).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the grid as tab-separated text with a header line of column
    /// names. This is the output format of the ad-hoc SQL screen.
    pub fn tab_separated(&self) -> String {
        let mut out = self.columns.join("\t");
        for row in &self.rows {
            out.push('\n');
            out.push_str(&row.join("\t"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_separated_prints_header_then_rows() {
        let grid = Grid {
            columns: vec!["id".into(), "name".into()],
            rows: vec![
                vec!["1".into(), "alpha".into()],
                vec!["2".into(), "beta".into()],
            ],
        };
        assert_eq!(grid.tab_separated(), "id\tname\n1\talpha\n2\tbeta");
    }

    #[test]
    fn tab_separated_with_no_rows_is_just_the_header() {
        let grid = Grid {
            columns: vec!["1".into()],
            rows: Vec::new(),
        };
        assert_eq!(grid.tab_separated(), "1");
        assert!(grid.is_empty());
    }
}
