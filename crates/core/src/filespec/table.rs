//! In-memory tables read from delimited text.

use std::fmt;
use std::io;
use std::path::Path;

use crate::error::FileSpecError;

/// One typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank in the source.
    Empty,
    /// Parsed as an integer.
    Int(i64),
    /// Parsed as a float.
    Float(f64),
    /// Anything else.
    Text(String),
}

impl Cell {
    /// Type a raw cell: integer, then float, else text. Blank → `Empty`.
    pub fn parse(raw: &str) -> Cell {
        let raw = raw.trim();
        if raw.is_empty() {
            Cell::Empty
        } else if let Ok(i) = raw.parse::<i64>() {
            Cell::Int(i)
        } else if let Ok(f) = raw.parse::<f64>() {
            Cell::Float(f)
        } else {
            Cell::Text(raw.to_string())
        }
    }

    /// `true` for `Int` and `Float`.
    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    /// `true` for `Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Float(x)
    }
}

/// A named column.
///
/// Columns read from delimited text keep each cell's source text, so lengths
/// reflect what the file held (`1.000`, `00012`) rather than the parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text.
    pub name: String,
    /// Cells, top to bottom.
    pub cells: Vec<Cell>,
    /// Trimmed source text per cell; empty for columns built from values.
    source: Vec<String>,
}

impl Column {
    /// A column from any cell-convertible values.
    pub fn new<T: Into<Cell>>(name: impl Into<String>, cells: impl IntoIterator<Item = T>) -> Self {
        Self {
            name: name.into(),
            cells: cells.into_iter().map(Into::into).collect(),
            source: Vec::new(),
        }
    }

    /// A column typed from raw text cells, keeping the text.
    pub fn from_source<S: AsRef<str>>(
        name: impl Into<String>,
        raw: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut column = Column::new(name, Vec::<Cell>::new());
        for text in raw {
            column.push_source(text.as_ref());
        }
        column
    }

    fn push_source(&mut self, raw: &str) {
        let raw = raw.trim();
        self.cells.push(Cell::parse(raw));
        self.source.push(raw.to_string());
    }

    /// Source text of row `index`, when the column was read from text.
    pub fn source_text(&self, index: usize) -> Option<&str> {
        self.source.get(index).map(String::as_str)
    }

    /// Every non-empty cell is a number. An all-empty column counts as
    /// numeric.
    pub fn is_numeric(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty() || c.is_number())
    }

    /// Longest length of any non-empty cell, in characters, measured on
    /// the source text when there is one.
    pub fn max_text_len(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(i, c)| match self.source_text(i) {
                Some(text) => text.chars().count(),
                None => c.to_string().chars().count(),
            })
            .max()
            .unwrap_or(0)
    }

    /// The top cell, if any.
    pub fn first(&self) -> Option<&Cell> {
        self.cells.first()
    }
}

/// Columns in physical file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// A table from prepared columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Read comma-delimited text with a header row.
    ///
    /// Short rows are padded with empty cells.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Table, FileSpecError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut columns: Vec<Column> = rdr
            .headers()?
            .iter()
            .map(|h| Column::new(h, Vec::<Cell>::new()))
            .collect();

        for record in rdr.records() {
            let record = record?;
            for (i, column) in columns.iter_mut().enumerate() {
                column.push_source(record.get(i).unwrap_or_default());
            }
        }

        Ok(Table { columns })
    }

    /// Read a delimited file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Table, FileSpecError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| FileSpecError::Read {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        Table::from_reader(file).map_err(|e| match e {
            FileSpecError::Csv(source) => FileSpecError::Read {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// All columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by exact header.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }
}
