use ratatui::widgets::TableState;

use crate::models::Grid;

/// Which panel of the tables screen owns the arrow keys.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum TablesFocus {
    List,
    Rows,
}

/// A loaded table plus the selection state of its grid. Rebuilt wholesale
/// whenever the table is (re)loaded; the ratatui `TableState` carries both
/// the highlighted row and the scroll offset.
pub(crate) struct GridView {
    pub(crate) table: String,
    pub(crate) grid: Grid,
    pub(crate) state: TableState,
}

impl GridView {
    pub(crate) fn new(table: String, grid: Grid) -> Self {
        let mut state = TableState::default();
        if !grid.is_empty() {
            state.select(Some(0));
        }
        Self { table, grid, state }
    }

    /// Replace the grid contents after a refresh, clamping the selection so
    /// it still points at a real row.
    pub(crate) fn replace_grid(&mut self, grid: Grid) {
        let selected = self.state.selected().unwrap_or(0);
        self.grid = grid;
        if self.grid.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(selected.min(self.grid.row_count() - 1)));
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.grid.is_empty() {
            return;
        }
        let len = self.grid.row_count() as isize;
        let current = self.state.selected().unwrap_or(0) as isize;
        let new = (current + offset).clamp(0, len - 1);
        self.state.select(Some(new as usize));
    }

    pub(crate) fn select_first(&mut self) {
        if !self.grid.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.grid.is_empty() {
            self.state.select(Some(self.grid.row_count() - 1));
        }
    }

    /// The currently highlighted row, if any.
    pub(crate) fn selected_row(&self) -> Option<&Vec<String>> {
        self.state.selected().and_then(|idx| self.grid.rows.get(idx))
    }

    /// Value of the named column in the selected row. Used to build the
    /// delete predicate from whatever the grid currently displays.
    pub(crate) fn selected_value(&self, column: &str) -> Option<String> {
        let idx = self.grid.columns.iter().position(|name| name == column)?;
        self.selected_row().and_then(|row| row.get(idx).cloned())
    }
}

/// State of the tables screen: the catalog listing on the left and the
/// optional loaded grid on the right.
pub(crate) struct TablesScreen {
    pub(crate) tables: Vec<String>,
    pub(crate) selected: usize,
    pub(crate) focus: TablesFocus,
    pub(crate) view: Option<GridView>,
}

impl TablesScreen {
    pub(crate) fn new() -> Self {
        Self {
            tables: Vec::new(),
            selected: 0,
            focus: TablesFocus::List,
            view: None,
        }
    }

    /// Replace the table list after a catalog refresh. The selection is
    /// clamped, and a loaded grid whose table vanished is dropped.
    pub(crate) fn set_tables(&mut self, tables: Vec<String>) {
        self.tables = tables;
        if self.selected >= self.tables.len() {
            self.selected = self.tables.len().saturating_sub(1);
        }
        if let Some(view) = &self.view {
            if !self.tables.iter().any(|name| *name == view.table) {
                self.view = None;
                self.focus = TablesFocus::List;
            }
        }
    }

    /// Clear everything; used when the database closes.
    pub(crate) fn reset(&mut self) {
        self.tables.clear();
        self.selected = 0;
        self.focus = TablesFocus::List;
        self.view = None;
    }

    pub(crate) fn current_table(&self) -> Option<&String> {
        self.tables.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.tables.is_empty() {
            return;
        }
        let len = self.tables.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            TablesFocus::List => {
                if self.view.is_some() {
                    TablesFocus::Rows
                } else {
                    TablesFocus::List
                }
            }
            TablesFocus::Rows => TablesFocus::List,
        };
    }
}

/// State of the ad-hoc SQL screen: the statement buffer and the rendered
/// output (result rows or error text).
pub(crate) struct QueryScreen {
    pub(crate) buffer: String,
    pub(crate) output: String,
    pub(crate) scroll: u16,
}

impl QueryScreen {
    pub(crate) fn new() -> Self {
        Self {
            buffer: String::new(),
            output: String::new(),
            scroll: 0,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.buffer.push(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Replace the output area and jump back to its top.
    pub(crate) fn set_output(&mut self, output: String) {
        self.output = output;
        self.scroll = 0;
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let lines = self.output.lines().count() as i32;
        let max = (lines - 1).max(0) as u16;
        let new = (self.scroll as i32 + delta).clamp(0, max as i32);
        self.scroll = new as u16;
    }

    /// Clear buffer and output; used when the database closes.
    pub(crate) fn reset(&mut self) {
        self.buffer.clear();
        self.output.clear();
        self.scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize) -> Grid {
        Grid {
            columns: vec!["id".to_string(), "name".to_string()],
            rows: (0..rows)
                .map(|n| vec![n.to_string(), format!("row{n}")])
                .collect(),
        }
    }

    #[test]
    fn grid_view_selects_the_first_row_when_rows_exist() {
        let view = GridView::new("t".to_string(), grid(3));
        assert_eq!(view.state.selected(), Some(0));
        assert_eq!(view.selected_value("name").as_deref(), Some("row0"));
    }

    #[test]
    fn grid_view_selection_clamps_at_both_ends() {
        let mut view = GridView::new("t".to_string(), grid(3));
        view.move_selection(-5);
        assert_eq!(view.state.selected(), Some(0));
        view.move_selection(10);
        assert_eq!(view.state.selected(), Some(2));
    }

    #[test]
    fn replacing_the_grid_keeps_the_selection_in_bounds() {
        let mut view = GridView::new("t".to_string(), grid(5));
        view.select_last();
        view.replace_grid(grid(2));
        assert_eq!(view.state.selected(), Some(1));
        view.replace_grid(grid(0));
        assert_eq!(view.state.selected(), None);
    }

    #[test]
    fn vanished_table_drops_the_loaded_view() {
        let mut screen = TablesScreen::new();
        screen.set_tables(vec!["a".to_string(), "b".to_string()]);
        screen.view = Some(GridView::new("b".to_string(), grid(1)));
        screen.focus = TablesFocus::Rows;

        screen.set_tables(vec!["a".to_string()]);
        assert!(screen.view.is_none());
        assert!(screen.focus == TablesFocus::List);
    }

    #[test]
    fn query_scroll_never_leaves_the_output() {
        let mut screen = QueryScreen::new();
        screen.set_output("a\nb\nc".to_string());
        screen.scroll_by(10);
        assert_eq!(screen.scroll, 2);
        screen.scroll_by(-10);
        assert_eq!(screen.scroll, 0);
    }
}
