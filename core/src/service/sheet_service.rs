use crate::model::sales::SalesRecord;
use crate::model::selection::Selection;
use crate::model::sheet::{SheetEntry, SheetUpload};
use crate::repository::SheetRepository;
use crate::service::dto::SalesTable;
use anyhow::Result;
use tracing::{debug, info};

pub struct SheetService<R: SheetRepository> {
    repo: R,
}

impl<R: SheetRepository> SheetService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn available_sheets(&self, selection: &Selection) -> Result<Vec<SheetEntry>> {
        self.repo.find_sheets(selection)
    }

    /// Fetches the sheets for a selection and opens the first (latest) one.
    pub fn load(&self, selection: &Selection) -> Result<SheetView> {
        let sheets = self.available_sheets(selection)?;
        debug!(count = sheets.len(), timeframe = %selection.timeframe, "loaded sheets");
        Ok(SheetView::new(selection.clone(), sheets))
    }

    pub fn upload(&self, upload: &SheetUpload) -> Result<()> {
        upload.validate()?;
        self.repo.upload_sheets(upload)?;
        info!(brand = %upload.brand_id, "sheets uploaded");
        Ok(())
    }
}

/// The sheets fetched for one selection plus which of them is open.
/// A new selection always produces a new view.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetView {
    pub selection: Selection,
    pub sheets: Vec<SheetEntry>,
    selected: Option<usize>,
}

impl SheetView {
    pub fn new(selection: Selection, sheets: Vec<SheetEntry>) -> Self {
        let selected = if sheets.is_empty() { None } else { Some(0) };
        Self {
            selection,
            sheets,
            selected,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_sheet(&self) -> Option<&SheetEntry> {
        self.selected.and_then(|i| self.sheets.get(i))
    }

    pub fn records(&self) -> &[SalesRecord] {
        self.selected_sheet()
            .map(|s| s.sheet_data.as_slice())
            .unwrap_or(&[])
    }

    pub fn table(&self) -> SalesTable {
        SalesTable::build(self.records())
    }

    /// Opens the sheet with `sheet_id`. Unknown ids leave the view as it was.
    pub fn select(&mut self, sheet_id: &str) -> bool {
        match self.sheets.iter().position(|s| s.id == sheet_id) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.sheets.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }
}
