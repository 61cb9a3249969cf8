use salesdash_core::service::dto::RowDto;
use salesdash_core::{Brand, CellClass, SalesTable, SheetEntry};
use tabled::settings::object::{Cell, Rows};
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SalesRow {
    #[tabled(rename = "Row Labels")]
    label: String,
    #[tabled(rename = "No of TGT Dr")]
    target: String,
    #[tabled(rename = "No of CRM Dr")]
    engaged: String,
    #[tabled(rename = "Overall Sec(L)")]
    overall_sec: String,
    #[tabled(rename = "CRM Dr Sec (L)")]
    engaged_sec: String,
    #[tabled(rename = "P/D")]
    per_doctor: String,
    #[tabled(rename = "MTD Sales")]
    mtd: String,
}

impl From<&RowDto> for SalesRow {
    fn from(row: &RowDto) -> Self {
        let cell = |i: usize| row.cells.get(i).map(|c| c.text.clone()).unwrap_or_default();
        Self {
            label: row.label.clone(),
            target: cell(0),
            engaged: cell(1),
            overall_sec: cell(2),
            engaged_sec: cell(3),
            per_doctor: cell(4),
            mtd: cell(5),
        }
    }
}

#[derive(Tabled)]
struct SheetRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Manager")]
    manager: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Week")]
    week: String,
    #[tabled(rename = "Rows")]
    rows: usize,
}

#[derive(Tabled)]
struct BrandRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Brand")]
    name: String,
}

/// Grand Total first in blue, MTD cells red when shrinking and green above 1.
pub fn render_sales(table: &SalesTable) -> String {
    let rows: Vec<SalesRow> = table.all_rows().map(SalesRow::from).collect();
    let mut rendered = Table::new(rows);
    rendered
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    if table.total.is_some() {
        rendered.with(Modify::new(Rows::one(1)).with(Color::FG_BLUE));
    }

    // +1 for the header row, +1 for the label column
    for (i, row) in table.all_rows().enumerate() {
        for (j, cell) in row.cells.iter().enumerate() {
            let color = match cell.class {
                CellClass::Negative => Color::FG_RED,
                CellClass::Positive => Color::FG_GREEN,
                CellClass::Neutral => continue,
            };
            rendered.with(Modify::new(Cell::new(i + 1, j + 1)).with(color));
        }
    }

    rendered.to_string()
}

pub fn render_sheets(sheets: &[SheetEntry], selected: Option<&str>) -> String {
    let rows: Vec<SheetRow> = sheets
        .iter()
        .map(|s| SheetRow {
            date: if Some(s.id.as_str()) == selected {
                format!("> {}", s.display_date())
            } else {
                s.display_date()
            },
            id: s.id.clone(),
            manager: s.manager_type.to_string(),
            month: s.month.clone().unwrap_or_else(|| "-".to_string()),
            week: s.week.clone().unwrap_or_else(|| "-".to_string()),
            rows: s.sheet_data.len(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

pub fn render_brands(brands: &[Brand]) -> String {
    let rows: Vec<BrandRow> = brands
        .iter()
        .map(|b| BrandRow {
            id: b.brand_id.clone(),
            name: b.brand_name.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}
