//! Tabular extractor backed by a local SQLite database (libSQL).
//!
//! The connection lives only inside [`SqlDataExtractor::open`]; it is dropped
//! before `open` returns, on success and on every error path.

use std::fmt;
use std::path::Path;

use libsql::Builder;
use serde::Serialize;

use crate::error::ExtractError;

/// The single query the tabular extractor runs.
pub const GENRES_QUERY: &str = "SELECT * from genres";

/// One column value of a fetched row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<libsql::Value> for CellValue {
    fn from(value: libsql::Value) -> Self {
        match value {
            libsql::Value::Null => Self::Null,
            libsql::Value::Integer(i) => Self::Integer(i),
            libsql::Value::Real(r) => Self::Real(r),
            libsql::Value::Text(s) => Self::Text(s),
            libsql::Value::Blob(b) => Self::Blob(b),
        }
    }
}

/// Tuple-style rendering: `None`, `1`, `2.0`, `'Rock'`, `b'\x00'`.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{r:.1}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) => write_quoted(f, s),
            Self::Blob(bytes) => {
                f.write_str("b'")?;
                for byte in bytes {
                    write!(f, "\\x{byte:02x}")?;
                }
                f.write_str("'")
            }
        }
    }
}

/// Single quotes unless the text holds `'` and no `"`; the chosen quote is escaped.
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for ch in text.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

/// A fetched row, rendered as `(a, b)` or `(a,)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TableRow(pub Vec<CellValue>);

impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, cell) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cell}")?;
        }
        if self.0.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

/// Column names plus every fetched row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRows {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableRows {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for TableRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{row}")?;
        }
        f.write_str("]")
    }
}

/// Extractor for `.db` files.
#[derive(Debug, Clone)]
pub struct SqlDataExtractor {
    rows: TableRows,
}

impl SqlDataExtractor {
    /// Open `path`, run [`GENRES_QUERY`], fetch every row and close the
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Database` if the database cannot be opened or
    /// the query fails (e.g. the `genres` table does not exist).
    pub async fn open(path: &Path) -> Result<Self, ExtractError> {
        let db_error = |source: libsql::Error| ExtractError::Database {
            path: path.to_path_buf(),
            source,
        };

        let rows = {
            let db = Builder::new_local(path).build().await.map_err(db_error)?;
            let conn = db.connect().map_err(db_error)?;
            fetch_all(&conn, GENRES_QUERY).await.map_err(db_error)?
        };
        tracing::debug!(
            path = %path.display(),
            rows = rows.len(),
            "fetched table rows; connection closed"
        );

        Ok(Self { rows })
    }

    #[must_use]
    pub const fn parsed_data(&self) -> &TableRows {
        &self.rows
    }
}

async fn fetch_all(conn: &libsql::Connection, sql: &str) -> Result<TableRows, libsql::Error> {
    let mut rows = conn.query(sql, ()).await?;
    let column_count = rows.column_count();
    let columns = (0..column_count)
        .map(|i| rows.column_name(i).unwrap_or_default().to_string())
        .collect();

    let mut fetched = Vec::new();
    while let Some(row) = rows.next().await? {
        let cells = (0..column_count)
            .map(|i| row.get_value(i).map(CellValue::from))
            .collect::<Result<Vec<_>, _>>()?;
        fetched.push(TableRow(cells));
    }

    Ok(TableRows {
        columns,
        rows: fetched,
    })
}
