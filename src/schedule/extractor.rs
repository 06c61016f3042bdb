use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::domain::CellFlags;

pub const TABLE_ROWS: &str = "table.disconnection-detailed-table tbody tr";
pub const QUEUE_ATTR: &str = "data-queue";

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(TABLE_ROWS).expect("valid row selector"));
static CURRENT_DAY_CELLS: Lazy<Selector> = Lazy::new(|| cell_selector(DayClass::Current));
static OTHER_DAY_CELLS: Lazy<Selector> = Lazy::new(|| cell_selector(DayClass::Other));
static HALF_LEFT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".half.left").expect("valid half selector"));
static HALF_RIGHT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".half.right").expect("valid half selector"));

fn cell_selector(day: DayClass) -> Selector {
    let css = format!(
        "td div.disconnection-detailed-table-cell.cell.{}",
        day.token()
    );
    Selector::parse(&css).expect("valid cell selector")
}

/// Which calendar day a column-set belongs to.
///
/// The page lists today in the first body row and tomorrow in the second. The
/// printed date label is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Current,
    Other,
}

impl DayClass {
    pub fn token(self) -> &'static str {
        match self {
            Self::Current => "current_day",
            Self::Other => "other_day",
        }
    }

    pub fn row_index(self) -> usize {
        match self {
            Self::Current => 0,
            Self::Other => 1,
        }
    }

    fn cells(self) -> &'static Selector {
        match self {
            Self::Current => &*CURRENT_DAY_CELLS,
            Self::Other => &*OTHER_DAY_CELLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("no rows")]
    NoRows,
    #[error("row {index} rejected for {day}: {reason}")]
    RejectedRow {
        index: usize,
        day: &'static str,
        reason: String,
    },
}

/// Checks a row before its cells are read.
pub trait RowValidator {
    fn validate(&self, day: DayClass, index: usize, row_text: &str) -> Result<(), StructureError>;
}

/// Accepts every row; today and tomorrow are taken by position alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalRows;

impl RowValidator for PositionalRows {
    fn validate(&self, _day: DayClass, _index: usize, _row_text: &str) -> Result<(), StructureError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableExtractor<V = PositionalRows> {
    validator: V,
}

impl TableExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: RowValidator> TableExtractor<V> {
    pub fn with_validator(validator: V) -> Self {
        Self { validator }
    }

    /// Returns `(queue id, flags)` for every cell of `day`, left to right.
    ///
    /// Cells without a queue attribute get `Queue_<index>`, which depends on
    /// column order and is not stable across page layout changes. A row with
    /// no matching cells, or a missing second row, yields an empty list.
    pub fn extract(
        &self,
        document: &Html,
        day: DayClass,
    ) -> Result<Vec<(String, CellFlags)>, StructureError> {
        let mut rows = document.select(&ROW_SELECTOR).peekable();
        if rows.peek().is_none() {
            return Err(StructureError::NoRows);
        }

        let index = day.row_index();
        let Some(row) = rows.nth(index) else {
            return Ok(Vec::new());
        };

        let text = row.text().collect::<String>();
        self.validator.validate(day, index, text.trim())?;

        Ok(row
            .select(day.cells())
            .enumerate()
            .map(|(position, cell)| (queue_id(cell, position), read_flags(cell)))
            .collect())
    }
}

fn queue_id(cell: ElementRef<'_>, position: usize) -> String {
    cell.value()
        .attr(QUEUE_ATTR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Queue_{position}"))
}

fn read_flags(cell: ElementRef<'_>) -> CellFlags {
    CellFlags::from_classes(
        cell.value().classes(),
        cell.select(&HALF_LEFT).flat_map(|half| half.value().classes()),
        cell.select(&HALF_RIGHT).flat_map(|half| half.value().classes()),
    )
}
