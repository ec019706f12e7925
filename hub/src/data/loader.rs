use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::LoadError;

pub const TYPE_COLUMN: &str = "type";
pub const PROFIT_COLUMN: &str = "profit";

// ── Types ────────────────────────────────────────────────────────────────

/// Direction of a position as written in the `type` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionType {
    Long,
    Short,
    Other,
}

impl PositionType {
    /// Case-sensitive: only the exact strings `Long` and `Short` are recognised.
    pub fn from_cell(raw: &str) -> Option<Self> {
        match raw {
            "" => None,
            "Long" => Some(Self::Long),
            "Short" => Some(Self::Short),
            _ => Some(Self::Other),
        }
    }
}

/// One CSV row.
///
/// `position_type` and `profit` are the typed view used by the aggregator;
/// `fields` holds every column (trimmed header → value) in file order and is
/// what gets serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub position_type: Option<PositionType>,
    pub profit: f64,
    pub fields: Map<String, Value>,
}

impl Serialize for PositionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTable {
    pub columns: Vec<String>,
    pub records: Vec<PositionRecord>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Replace the `profit` cell with its numeric value (0 when unparsable).
    pub coerce_profit: bool,
}

// ── Loading ──────────────────────────────────────────────────────────────

/// Read `dir/file_name` into a [`PositionTable`].
///
/// A header-only file is an empty table; a file without a header is
/// [`LoadError::Empty`].
pub fn load_table(dir: &Path, file_name: &str, opts: LoadOptions) -> Result<PositionTable, LoadError> {
    let path = dir.join(file_name);
    let bytes = std::fs::read(&path)?;
    parse_table(&bytes, opts)
}

pub fn parse_table(bytes: &[u8], opts: LoadOptions) -> Result<PositionTable, LoadError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoadError::Empty);
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let columns = dedupe_columns(rdr.headers()?.iter());
    if columns.is_empty() {
        return Err(LoadError::Empty);
    }

    let type_idx = columns.iter().position(|c| c == TYPE_COLUMN);
    let profit_idx = columns.iter().position(|c| c == PROFIT_COLUMN);

    // Cells are typed per column, so the whole file is read before any row is built.
    let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;
    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|i| ColumnKind::infer(rows.iter().map(|r| r.get(i).unwrap_or(""))))
        .collect();

    let mut records = Vec::with_capacity(rows.len());
    for (n, row) in rows.iter().enumerate() {
        if row.len() > columns.len() {
            tracing::debug!(
                "row {}: dropped {} cells beyond {} header columns",
                n + 1,
                row.len() - columns.len(),
                columns.len()
            );
        }

        let mut fields = Map::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            fields.insert(name.clone(), kinds[i].value(row.get(i).unwrap_or("")));
        }

        let position_type = type_idx
            .and_then(|i| row.get(i))
            .and_then(PositionType::from_cell);
        let profit = profit_idx
            .and_then(|i| row.get(i))
            .map(coerce_number)
            .unwrap_or(0.0);

        if opts.coerce_profit {
            if let Some(slot) = fields.get_mut(PROFIT_COLUMN) {
                *slot = number_value(profit);
            }
        }

        records.push(PositionRecord {
            position_type,
            profit,
            fields,
        });
    }

    Ok(PositionTable { columns, records })
}

/// Collapse a missing file or an empty file into an empty record list.
pub fn records_or_empty(
    result: Result<PositionTable, LoadError>,
) -> Result<Vec<PositionRecord>, LoadError> {
    match result {
        Ok(table) => Ok(table.records),
        Err(LoadError::NotFound) | Err(LoadError::Empty) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

// ── Cells ────────────────────────────────────────────────────────────────

/// Parse a numeric cell, treating anything unparsable or non-finite as zero.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Type shared by every cell of a passthrough column.
///
/// A column is numeric only when all of its non-empty cells parse; one text
/// cell keeps the whole column as the original strings, so `0012` stays `0012`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Text,
}

impl ColumnKind {
    fn infer<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let mut kind = Self::Int;
        for cell in cells.map(str::trim).filter(|c| !c.is_empty()) {
            if cell.parse::<i64>().is_ok() {
                continue;
            }
            if cell.parse::<f64>().is_ok() {
                kind = Self::Float;
            } else {
                return Self::Text;
            }
        }
        kind
    }

    fn value(self, raw: &str) -> Value {
        let t = raw.trim();
        if t.is_empty() {
            return Value::Null;
        }
        match self {
            Self::Int => t
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(raw.to_string())),
            Self::Float => match t.parse::<f64>() {
                Ok(f) if f.is_finite() => Value::from(f),
                _ => Value::Null,
            },
            Self::Text => Value::String(raw.to_string()),
        }
    }
}

/// Whole floats go out as integers so `2` stays `2` rather than `2.0`.
fn number_value(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Value::from(v as i64)
    } else {
        Value::from(v)
    }
}

/// Repeated header names get `.1`, `.2`, ... suffixes so no column is lost.
fn dedupe_columns<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for h in headers {
        let mut name = h.to_string();
        let mut n = 0;
        while out.contains(&name) {
            n += 1;
            name = format!("{h}.{n}");
        }
        out.push(name);
    }
    if out.len() == 1 && out[0].is_empty() {
        out.clear();
    }
    out
}
