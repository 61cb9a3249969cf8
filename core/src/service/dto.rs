use serde::Serialize;

use crate::model::sales::{CellValue, MetricField, SalesRecord};
use crate::service::aggregate::{classify_cell, compute_aggregate, format_field, CellClass};

pub const ROW_LABEL_HEADER: &str = "Row Labels";

#[derive(Debug, Clone, PartialEq)]
pub struct CellDto {
    pub text: String,
    pub class: CellClass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowDto {
    pub label: String,
    pub cells: Vec<CellDto>,
    pub is_total: bool,
}

/// Everything a front end needs to draw the sales table: headers, the
/// Grand Total row, and one formatted row per manager.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTable {
    pub headers: Vec<&'static str>,
    pub total: Option<RowDto>,
    pub rows: Vec<RowDto>,
}

impl SalesTable {
    /// The Grand Total row is only present when there is at least one record.
    pub fn build(records: &[SalesRecord]) -> Self {
        let mut headers = vec![ROW_LABEL_HEADER];
        headers.extend(MetricField::ALL.iter().map(|f| f.header()));

        let total = if records.is_empty() {
            None
        } else {
            Some(total_row(&compute_aggregate(records)))
        };

        Self {
            headers,
            total,
            rows: records.iter().map(record_row).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total first, then the records, as the dashboard shows them.
    pub fn all_rows(&self) -> impl Iterator<Item = &RowDto> {
        self.total.iter().chain(self.rows.iter())
    }
}

fn record_row(record: &SalesRecord) -> RowDto {
    let cells = MetricField::ALL
        .iter()
        .map(|&field| {
            let value = record.value(field);
            CellDto {
                text: format_field(&CellValue::Number(value), field),
                class: classify_cell(value, field),
            }
        })
        .collect();

    RowDto {
        label: record.manager_name.clone(),
        cells,
        is_total: false,
    }
}

// The total row is emphasised as a whole; its cells are never highlighted.
fn total_row(total: &SalesRecord) -> RowDto {
    let mut row = record_row(total);
    for cell in &mut row.cells {
        cell.class = CellClass::Neutral;
    }
    row.is_total = true;
    row
}

/// Flat export of a table, for `--json` output.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SalesTableExport {
    pub total: Option<SalesRecord>,
    pub rows: Vec<SalesRecord>,
}

impl SalesTableExport {
    pub fn new(records: &[SalesRecord]) -> Self {
        Self {
            total: (!records.is_empty()).then(|| compute_aggregate(records)),
            rows: records.to_vec(),
        }
    }
}
