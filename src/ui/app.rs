use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap,
};
use ratatui::Frame;

use crate::db::{
    create_table, delete_rows, fetch_tables, insert_row, load_table, primary_key_column, run_sql,
    Database, SqlOutcome,
};

use super::forms::{ConfirmRowDelete, PathAction, PathForm, RowForm, TableField, TableForm};
use super::helpers::{centered_rect, column_constraints, surface_error};
use super::screens::{GridView, QueryScreen, TablesFocus, TablesScreen};

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 3;

/// The two top-level tabs, mirroring the browse/query split of the tool.
#[derive(Copy, Clone, PartialEq, Eq)]
enum ActiveTab {
    Tables,
    Query,
}

impl ActiveTab {
    fn index(self) -> usize {
        match self {
            ActiveTab::Tables => 0,
            ActiveTab::Query => 1,
        }
    }
}

/// Fine-grained modes scoped on top of the active tab. Keeping this explicit
/// makes it easy to reason about which rendering path runs and what keyboard
/// input should do.
enum Mode {
    Normal,
    OpeningDatabase(PathForm),
    CreatingTable(TableForm),
    InsertingRow(RowForm),
    ConfirmDeleteRow(ConfirmRowDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The connection is owned
/// here as an `Option`: `None` is the Disconnected state, and every database
/// action checks it before touching the engine.
pub struct App {
    db: Option<Database>,
    tab: ActiveTab,
    tables: TablesScreen,
    query: QueryScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Start disconnected with empty screens.
    pub fn new() -> Self {
        Self {
            db: None,
            tab: ActiveTab::Tables,
            tables: TablesScreen::new(),
            query: QueryScreen::new(),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::OpeningDatabase(form) => self.handle_path_form(code, form)?,
            Mode::CreatingTable(form) => self.handle_table_form(code, form)?,
            Mode::InsertingRow(form) => self.handle_row_form(code, form)?,
            Mode::ConfirmDeleteRow(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.tab {
            ActiveTab::Tables => self.handle_tables_key(code, exit),
            ActiveTab::Query => self.handle_query_key(code, exit),
        }
    }

    fn handle_tables_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.clear_status();
                return Ok(Mode::OpeningDatabase(PathForm::new(PathAction::Open)));
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.clear_status();
                return Ok(Mode::OpeningDatabase(PathForm::new(PathAction::Create)));
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.close_database();
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                if self.db.is_some() {
                    self.clear_status();
                    return Ok(Mode::CreatingTable(TableForm::default()));
                }
                self.set_status("Open a database first.", StatusKind::Error);
            }
            KeyCode::Char('v') | KeyCode::F(2) => {
                self.clear_status();
                self.tab = ActiveTab::Query;
            }
            KeyCode::Tab => self.tables.toggle_focus(),
            KeyCode::Up => self.move_vertical(-1),
            KeyCode::Down => self.move_vertical(1),
            KeyCode::PageUp => self.move_vertical(-10),
            KeyCode::PageDown => self.move_vertical(10),
            KeyCode::Home => {
                if let Some(view) = self.tables.view.as_mut() {
                    if self.tables.focus == TablesFocus::Rows {
                        view.select_first();
                    }
                }
            }
            KeyCode::End => {
                if let Some(view) = self.tables.view.as_mut() {
                    if self.tables.focus == TablesFocus::Rows {
                        view.select_last();
                    }
                }
            }
            KeyCode::Enter => {
                if self.db.is_none() {
                    self.set_status("Open a database first.", StatusKind::Error);
                } else if let Some(table) = self.tables.current_table().cloned() {
                    self.load_table_view(&table);
                } else {
                    self.set_status("No table selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.refresh_loaded_table();
            }
            KeyCode::Char('+') => {
                return self.begin_insert();
            }
            KeyCode::Char('-') => {
                return self.begin_delete();
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_query_key(&mut self, code: KeyCode, _exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::F(2) => {
                self.clear_status();
                self.tab = ActiveTab::Tables;
            }
            KeyCode::Enter => self.execute_sql(),
            KeyCode::Backspace => self.query.backspace(),
            KeyCode::Up => self.query.scroll_by(-1),
            KeyCode::Down => self.query.scroll_by(1),
            KeyCode::PageUp => self.query.scroll_by(-10),
            KeyCode::PageDown => self.query.scroll_by(10),
            KeyCode::Char(ch) => self.query.push_char(ch),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_path_form(&mut self, code: KeyCode, mut form: PathForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let path = match form.parse_inputs() {
                    Ok(path) => path,
                    Err(err) => {
                        form.error = Some(surface_error(&err));
                        return Ok(Mode::OpeningDatabase(form));
                    }
                };
                let opened = match form.action {
                    PathAction::Open => Database::open(&path),
                    PathAction::Create => Database::create(&path),
                };
                match opened {
                    Ok(db) => {
                        let message = match form.action {
                            PathAction::Open => format!("Connected to {}", path.display()),
                            PathAction::Create => {
                                format!("Database created at {}", path.display())
                            }
                        };
                        // Set the status first so a failed catalog refresh can
                        // overwrite it with its error.
                        self.set_status(message, StatusKind::Info);
                        self.connect(db);
                        return Ok(Mode::Normal);
                    }
                    Err(err) => {
                        form.error = Some(surface_error(&err));
                        return Ok(Mode::OpeningDatabase(form));
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::OpeningDatabase(form))
    }

    fn handle_table_form(&mut self, code: KeyCode, mut form: TableForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let (name, columns) = match form.parse_inputs() {
                    Ok(parsed) => parsed,
                    Err(err) => {
                        form.error = Some(surface_error(&err));
                        return Ok(Mode::CreatingTable(form));
                    }
                };
                let Some(db) = self.db.as_ref() else {
                    self.set_status("Open a database first.", StatusKind::Error);
                    return Ok(Mode::Normal);
                };
                if let Err(err) = create_table(db.conn(), &name, &columns) {
                    form.error = Some(surface_error(&err));
                    return Ok(Mode::CreatingTable(form));
                }
                self.refresh_tables();
                self.set_status(format!("Table '{name}' created."), StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::CreatingTable(form))
    }

    fn handle_row_form(&mut self, code: KeyCode, mut form: RowForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let Some(db) = self.db.as_ref() else {
                    self.set_status("Open a database first.", StatusKind::Error);
                    return Ok(Mode::Normal);
                };
                // Engine errors (constraint violations, type mismatches) keep
                // the dialog open with the message inline.
                if let Err(err) = insert_row(db.conn(), &form.table, &form.values()) {
                    form.error = Some(surface_error(&err));
                    return Ok(Mode::InsertingRow(form));
                }
                let table = form.table.clone();
                self.reload_grid();
                self.set_status(format!("Row inserted into '{table}'."), StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::InsertingRow(form))
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmRowDelete) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let Some(db) = self.db.as_ref() else {
                    self.set_status("Open a database first.", StatusKind::Error);
                    return Ok(Mode::Normal);
                };
                match delete_rows(
                    db.conn(),
                    &confirm.table,
                    &confirm.key_column,
                    &confirm.key_value,
                ) {
                    Ok(removed) => {
                        let table = confirm.table.clone();
                        self.reload_grid();
                        self.set_status(
                            format!("Deleted {removed} row(s) from '{table}'."),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                    }
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmDeleteRow(confirm)),
        }
    }

    fn move_vertical(&mut self, offset: isize) {
        match self.tables.focus {
            TablesFocus::List => self.tables.move_selection(offset),
            TablesFocus::Rows => {
                if let Some(view) = self.tables.view.as_mut() {
                    view.move_selection(offset);
                }
            }
        }
    }

    /// Adopt a freshly opened connection. Replacing an existing one drops the
    /// old `Database`, which releases its handle.
    fn connect(&mut self, db: Database) {
        self.db = Some(db);
        self.tables.reset();
        self.query.reset();
        self.refresh_tables();
    }

    fn close_database(&mut self) {
        match self.db.take() {
            Some(db) => {
                db.close();
                self.tables.reset();
                self.query.reset();
                self.set_status("Connection closed.", StatusKind::Info);
            }
            None => self.set_status("No database is open.", StatusKind::Error),
        }
    }

    /// Replace the table list from the catalog. Full replace, no diffing.
    fn refresh_tables(&mut self) {
        let Some(db) = self.db.as_ref() else {
            return;
        };
        match fetch_tables(db.conn()) {
            Ok(tables) => self.tables.set_tables(tables),
            Err(err) => {
                let message = surface_error(&err);
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    fn load_table_view(&mut self, table: &str) {
        let Some(db) = self.db.as_ref() else {
            return;
        };
        match load_table(db.conn(), table) {
            Ok(grid) => {
                let rows = grid.row_count();
                self.tables.view = Some(GridView::new(table.to_string(), grid));
                self.set_status(
                    format!("Table '{table}' loaded with {rows} row(s)."),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                let message = surface_error(&err);
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    /// Rebuild the loaded grid from the database, keeping the selection in
    /// bounds. Quietly does nothing when no table is loaded.
    fn reload_grid(&mut self) {
        let Some(db) = self.db.as_ref() else {
            return;
        };
        let Some(view) = self.tables.view.as_mut() else {
            return;
        };
        match load_table(db.conn(), &view.table) {
            Ok(grid) => view.replace_grid(grid),
            Err(err) => {
                let message = surface_error(&err);
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    fn refresh_loaded_table(&mut self) {
        if self.db.is_none() {
            self.set_status("Open a database first.", StatusKind::Error);
            return;
        }
        if self.tables.view.is_none() {
            self.set_status("No table loaded to refresh.", StatusKind::Error);
            return;
        }
        self.set_status("Refreshed.", StatusKind::Info);
        self.refresh_tables();
        self.reload_grid();
    }

    fn begin_insert(&mut self) -> Result<Mode> {
        if self.db.is_none() {
            self.set_status("Open a database first.", StatusKind::Error);
            return Ok(Mode::Normal);
        }
        let Some(view) = self.tables.view.as_ref() else {
            self.set_status("Load a table first.", StatusKind::Error);
            return Ok(Mode::Normal);
        };
        if view.grid.columns.is_empty() {
            self.set_status("The loaded table has no columns.", StatusKind::Error);
            return Ok(Mode::Normal);
        }
        let form = RowForm::for_columns(&view.table, &view.grid.columns);
        self.clear_status();
        Ok(Mode::InsertingRow(form))
    }

    fn begin_delete(&mut self) -> Result<Mode> {
        let Some(db) = self.db.as_ref() else {
            self.set_status("Open a database first.", StatusKind::Error);
            return Ok(Mode::Normal);
        };
        let Some(view) = self.tables.view.as_ref() else {
            self.set_status("Load a table first.", StatusKind::Error);
            return Ok(Mode::Normal);
        };
        if view.selected_row().is_none() {
            self.set_status("No row selected to delete.", StatusKind::Error);
            return Ok(Mode::Normal);
        }

        // Prefer the declared primary key over the leftmost-column guess.
        let key_column = match primary_key_column(db.conn(), &view.table) {
            Ok(column) => column.or_else(|| view.grid.columns.first().cloned()),
            Err(err) => {
                let message = surface_error(&err);
                self.set_status(message, StatusKind::Error);
                return Ok(Mode::Normal);
            }
        };
        let Some(key_column) = key_column else {
            self.set_status("Could not determine a key column.", StatusKind::Error);
            return Ok(Mode::Normal);
        };
        let Some(key_value) = view.selected_value(&key_column) else {
            self.set_status(
                format!("Key column '{key_column}' is not in the grid."),
                StatusKind::Error,
            );
            return Ok(Mode::Normal);
        };

        let table = view.table.clone();
        self.clear_status();
        Ok(Mode::ConfirmDeleteRow(ConfirmRowDelete {
            table,
            key_column,
            key_value,
        }))
    }

    /// Run whatever sits in the SQL buffer. SELECT output lands in the
    /// results area as tab-separated text; anything else reports its row
    /// count and refreshes the catalog plus the loaded grid, since DDL/DML
    /// may have changed either.
    fn execute_sql(&mut self) {
        let Some(db) = self.db.as_ref() else {
            self.set_status("Open a database first.", StatusKind::Error);
            return;
        };
        match run_sql(db.conn(), &self.query.buffer) {
            Ok(SqlOutcome::Rows(grid)) => {
                let rows = grid.row_count();
                self.query.set_output(grid.tab_separated());
                self.set_status(format!("Query returned {rows} row(s)."), StatusKind::Info);
            }
            Ok(SqlOutcome::Changed(changed)) => {
                self.query
                    .set_output(format!("OK ({changed} row(s) affected)"));
                self.set_status("Statement executed.", StatusKind::Info);
                self.refresh_tables();
                self.reload_grid();
            }
            Err(err) => {
                let message = surface_error(&err);
                self.query.set_output(format!("Error: {message}"));
                self.set_status("Error in statement.", StatusKind::Error);
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        match self.tab {
            ActiveTab::Tables => self.draw_tables(frame, chunks[1]),
            ActiveTab::Query => self.draw_query(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Normal => {}
            Mode::OpeningDatabase(form) => self.draw_path_form(frame, chunks[1], form),
            Mode::CreatingTable(form) => self.draw_table_form(frame, chunks[1], form),
            Mode::InsertingRow(form) => self.draw_row_form(frame, chunks[1], form),
            Mode::ConfirmDeleteRow(confirm) => self.draw_confirm_delete(frame, chunks[1], confirm),
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(area);

        let tabs = Tabs::new(vec!["Tables", "SQL"])
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, parts[0]);

        let connection = match &self.db {
            Some(db) => format!("Database: {}", db.path().display()),
            None => "Database: none".to_string(),
        };
        let label = Paragraph::new(connection)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(label, parts[1]);
    }

    fn draw_tables(&mut self, frame: &mut Frame, area: Rect) {
        if self.db.is_none() {
            let message =
                Paragraph::new("No database open.\n\nPress 'o' to open one or 'n' to create one.")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title("Tables"));
            frame.render_widget(message, area);
            return;
        }

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(area);

        self.draw_table_list(frame, panels[0]);
        self.draw_grid(frame, panels[1]);
    }

    fn draw_table_list(&self, frame: &mut Frame, area: Rect) {
        let focused = self.tables.focus == TablesFocus::List;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Tables");

        if self.tables.tables.is_empty() {
            let message = Paragraph::new("No tables.\nPress 't' to create one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .tables
            .tables
            .iter()
            .map(|name| ListItem::new(name.clone()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.tables.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_grid(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.tables.focus == TablesFocus::Rows;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let Some(view) = self.tables.view.as_mut() else {
            let message = Paragraph::new("Select a table and press Enter to browse it.")
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border_style)
                        .title("Rows"),
                );
            frame.render_widget(message, area);
            return;
        };

        let title = format!("{} ({} rows)", view.table, view.grid.row_count());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let header = Row::new(
            view.grid
                .columns
                .iter()
                .map(|name| name.clone())
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = view
            .grid
            .rows
            .iter()
            .map(|cells| Row::new(cells.clone()))
            .collect();

        let table = Table::new(rows, column_constraints(&view.grid))
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut view.state);
    }

    fn draw_query(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let input_block = Block::default().borders(Borders::ALL).title("SQL");
        let input = Paragraph::new(self.query.buffer.as_str()).block(input_block.clone());
        frame.render_widget(input, chunks[0]);

        if matches!(self.mode, Mode::Normal) {
            let inner = input_block.inner(chunks[0]);
            let cursor_x = inner.x + self.query.buffer.chars().count() as u16;
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }

        let output = Paragraph::new(self.query.output.as_str())
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .scroll((self.query.scroll, 0));
        frame.render_widget(output, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.mode, self.tab) {
            (Mode::ConfirmDeleteRow(_), _) => Line::from(vec![
                Span::styled("[y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[n/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Mode::OpeningDatabase(_), _) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Connect   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Mode::CreatingTable(_) | Mode::InsertingRow(_), _) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Mode::Normal, ActiveTab::Query) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Execute   "),
                Span::styled("[Up/Down]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Tables   "),
                Span::styled("[Ctrl+C]", key_style),
                Span::raw(" Quit"),
            ]),
            (Mode::Normal, ActiveTab::Tables) => Line::from(vec![
                Span::styled("[o]", key_style),
                Span::raw(" Open   "),
                Span::styled("[n]", key_style),
                Span::raw(" New   "),
                Span::styled("[c]", key_style),
                Span::raw(" Close   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Load   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Focus   "),
                Span::styled("[t]", key_style),
                Span::raw(" New Table   "),
                Span::styled("[+]", key_style),
                Span::raw(" Insert   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[r]", key_style),
                Span::raw(" Refresh   "),
                Span::styled("[F2]", key_style),
                Span::raw(" SQL   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_path_form(&self, frame: &mut Frame, area: Rect, form: &PathForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(form.title()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![form.build_line(), Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to connect - Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "Path: ".len() as u16 + form.value_len() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_table_form(&self, frame: &mut Frame, area: Rect, form: &TableForm) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Create Table").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let name_line = form.build_line("Name", TableField::Name);
        let columns_line = form.build_line("Columns", TableField::Columns);

        let mut lines = vec![name_line, columns_line, Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Columns use DDL syntax, e.g. id INTEGER PRIMARY KEY, name TEXT",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (cursor_x, cursor_y) = match form.active {
            TableField::Name => {
                let prefix = "Name: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(TableField::Name) as u16,
                    inner.y,
                )
            }
            TableField::Columns => {
                let prefix = "Columns: ".len() as u16;
                (
                    inner.x + prefix + form.value_len(TableField::Columns) as u16,
                    inner.y + 1,
                )
            }
        };
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_row_form(&self, frame: &mut Frame, area: Rect, form: &RowForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let title = format!("Insert into {}", form.table);
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        // Window the fields so the active one stays visible when the table
        // has more columns than the dialog has lines.
        let reserved = 2usize;
        let capacity = (inner.height as usize).saturating_sub(reserved).max(1);
        let start = if form.active >= capacity {
            form.active + 1 - capacity
        } else {
            0
        };
        let end = (start + capacity).min(form.columns.len());

        let mut lines: Vec<Line> = (start..end).map(|idx| form.build_line(idx)).collect();
        lines.push(Line::from(""));
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save - Tab to switch - Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if form.active >= start && form.active < end {
            let cursor_x = inner.x
                + form.label_len(form.active) as u16
                + form.value_len(form.active) as u16;
            let cursor_y = inner.y + (form.active - start) as u16;
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRowDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Row").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete from '{}' where {} = {}?",
                confirm.table, confirm.key_column, confirm.key_value
            )),
            Line::from("Every row sharing this key value will be removed."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
