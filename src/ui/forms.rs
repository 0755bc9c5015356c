use std::path::PathBuf;

use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Whether the path prompt opens an existing file or creates a new one. The
/// two share one form; only the title and the connection call differ.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum PathAction {
    Open,
    Create,
}

/// Modal form asking for a database file path. This replaces the native file
/// picker of a desktop app; the user types or pastes the path directly.
#[derive(Clone)]
pub(crate) struct PathForm {
    pub(crate) action: PathAction,
    pub(crate) path: String,
    pub(crate) error: Option<String>,
}

impl PathForm {
    pub(crate) fn new(action: PathAction) -> Self {
        Self {
            action,
            path: String::new(),
            error: None,
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self.action {
            PathAction::Open => "Open Database",
            PathAction::Create => "New Database",
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.path.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.path.pop();
    }

    /// Validate and return the entered path.
    pub(crate) fn parse_inputs(&self) -> Result<PathBuf> {
        let trimmed = self.path.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("A file path is required."));
        }
        Ok(PathBuf::from(trimmed))
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        let display = if self.path.is_empty() {
            "<e.g. ./app.sqlite>".to_string()
        } else {
            self.path.clone()
        };
        let style = if self.path.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Line::from(vec![Span::raw("Path: "), Span::styled(display, style)])
    }

    pub(crate) fn value_len(&self) -> usize {
        self.path.chars().count()
    }
}

/// Fields available within the create-table form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum TableField {
    #[default]
    Name,
    Columns,
}

/// Form state for creating a table: a name plus a raw column definition list
/// (`id INTEGER PRIMARY KEY, name TEXT`). The definitions stay free text
/// because they are a DDL fragment, not values.
#[derive(Default, Clone)]
pub(crate) struct TableForm {
    pub(crate) name: String,
    pub(crate) columns: String,
    pub(crate) active: TableField,
    pub(crate) error: Option<String>,
}

impl TableForm {
    /// Swap focus between the name and column definition fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            TableField::Name => TableField::Columns,
            TableField::Columns => TableField::Name,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            TableField::Name => self.name.push(ch),
            TableField::Columns => self.columns.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            TableField::Name => {
                self.name.pop();
            }
            TableField::Columns => {
                self.columns.pop();
            }
        }
    }

    /// Validate the inputs and return trimmed values ready for the DDL call.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Table name is required."));
        }
        let columns = self.columns.trim();
        if columns.is_empty() {
            return Err(anyhow!("Column definitions are required."));
        }
        Ok((name.to_string(), columns.to_string()))
    }

    pub(crate) fn build_line(&self, field_name: &str, field: TableField) -> Line<'static> {
        let (value, is_active) = match field {
            TableField::Name => (&self.name, self.active == TableField::Name),
            TableField::Columns => (&self.columns, self.active == TableField::Columns),
        };

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, field: TableField) -> usize {
        match field {
            TableField::Name => self.name.chars().count(),
            TableField::Columns => self.columns.chars().count(),
        }
    }
}

/// Generated insert form: one text field per column of the loaded grid. Every
/// value is sent to the database as a positional parameter, so the form does
/// not try to second-guess column types.
#[derive(Clone)]
pub(crate) struct RowForm {
    pub(crate) table: String,
    pub(crate) columns: Vec<String>,
    pub(crate) values: Vec<String>,
    pub(crate) active: usize,
    pub(crate) error: Option<String>,
}

impl RowForm {
    /// Build an empty form for the given table shape.
    pub(crate) fn for_columns(table: &str, columns: &[String]) -> Self {
        Self {
            table: table.to_string(),
            columns: columns.to_vec(),
            values: vec![String::new(); columns.len()],
            active: 0,
            error: None,
        }
    }

    /// Cycle focus forward through the fields, wrapping at the end.
    pub(crate) fn next_field(&mut self) {
        if !self.columns.is_empty() {
            self.active = (self.active + 1) % self.columns.len();
        }
    }

    /// Cycle focus backward through the fields.
    pub(crate) fn previous_field(&mut self) {
        if !self.columns.is_empty() {
            self.active = self
                .active
                .checked_sub(1)
                .unwrap_or(self.columns.len() - 1);
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if let Some(value) = self.values.get_mut(self.active) {
            value.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.values.get_mut(self.active) {
            value.pop();
        }
    }

    /// The values in column order, exactly as typed. Empty fields stay empty
    /// strings; whether that is acceptable is the database's call (NOT NULL
    /// constraints surface as engine errors in the dialog).
    pub(crate) fn values(&self) -> Vec<String> {
        self.values.clone()
    }

    pub(crate) fn build_line(&self, index: usize) -> Line<'static> {
        let column = self.columns.get(index).cloned().unwrap_or_default();
        let value = self.values.get(index).cloned().unwrap_or_default();
        let is_active = index == self.active;

        let display = if value.is_empty() {
            "<empty>".to_string()
        } else {
            value
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if self.values.get(index).map(String::is_empty).unwrap_or(true) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{column}: ")),
            Span::styled(display, style),
        ])
    }

    pub(crate) fn value_len(&self, index: usize) -> usize {
        self.values
            .get(index)
            .map(|value| value.chars().count())
            .unwrap_or(0)
    }

    /// Prefix width of the active field's label, used to place the cursor.
    pub(crate) fn label_len(&self, index: usize) -> usize {
        self.columns
            .get(index)
            .map(|column| column.chars().count() + 2)
            .unwrap_or(0)
    }
}

/// State for confirming a row deletion: which table, which key column, and
/// the text value the delete will match on.
#[derive(Clone)]
pub(crate) struct ConfirmRowDelete {
    pub(crate) table: String,
    pub(crate) key_column: String,
    pub(crate) key_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_form_rejects_blank_input() {
        let form = PathForm::new(PathAction::Open);
        assert!(form.parse_inputs().is_err());
    }

    #[test]
    fn path_form_trims_the_entered_path() {
        let mut form = PathForm::new(PathAction::Create);
        for ch in "  data.db ".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.parse_inputs().expect("parse"), PathBuf::from("data.db"));
    }

    #[test]
    fn table_form_requires_both_fields() {
        let mut form = TableForm::default();
        assert!(form.parse_inputs().is_err());
        for ch in "notes".chars() {
            form.push_char(ch);
        }
        assert!(form.parse_inputs().is_err());
        form.toggle_field();
        for ch in "id INTEGER".chars() {
            form.push_char(ch);
        }
        let (name, columns) = form.parse_inputs().expect("parse");
        assert_eq!(name, "notes");
        assert_eq!(columns, "id INTEGER");
    }

    #[test]
    fn row_form_tracks_one_value_per_column() {
        let columns = vec!["id".to_string(), "name".to_string()];
        let mut form = RowForm::for_columns("t", &columns);
        form.push_char('1');
        form.next_field();
        for ch in "alpha".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.values(), vec!["1".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn row_form_field_cycling_wraps_both_ways() {
        let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut form = RowForm::for_columns("t", &columns);
        form.previous_field();
        assert_eq!(form.active, 2);
        form.next_field();
        assert_eq!(form.active, 0);
    }

    #[test]
    fn control_characters_never_enter_a_field() {
        let mut form = PathForm::new(PathAction::Open);
        assert!(!form.push_char('\u{7}'));
        assert!(form.path.is_empty());
    }
}
