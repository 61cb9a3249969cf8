use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::sales::SalesRecord;
use crate::model::selection::ManagerType;
use crate::time::{display_date, parse_data_date};

const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// One uploaded sheet as returned by the backend listings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SheetEntry {
    #[serde(rename = "sheetId", deserialize_with = "super::id_string")]
    pub id: String,
    #[serde(rename = "Datadate")]
    pub data_date: String,
    #[serde(rename = "sheetData", default, deserialize_with = "super::null_default")]
    pub sheet_data: Vec<SalesRecord>,
    #[serde(rename = "brandId", deserialize_with = "super::id_string")]
    pub brand_id: String,
    #[serde(rename = "brandName", default, deserialize_with = "super::null_default")]
    pub brand_name: String,
    #[serde(rename = "managerType")]
    pub manager_type: ManagerType,
    #[serde(default, deserialize_with = "super::opt_id_string")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "super::opt_id_string")]
    pub week: Option<String>,
    #[serde(default, deserialize_with = "super::opt_id_string")]
    pub year: Option<String>,
}

impl SheetEntry {
    pub fn date(&self) -> Option<NaiveDate> {
        parse_data_date(&self.data_date).ok()
    }

    /// "30 Sep 2025"; falls back to the raw value when it cannot be parsed.
    pub fn display_date(&self) -> String {
        self.date()
            .map(display_date)
            .unwrap_or_else(|| self.data_date.clone())
    }
}

/// A pair of spreadsheets to upload for one brand, manager type and date.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetUpload {
    pub brand_id: String,
    pub brand_name: String,
    pub manager_type: ManagerType,
    pub data_date: NaiveDate,
    pub regional_manager_file: PathBuf,
    pub sales_data_file: PathBuf,
}

impl SheetUpload {
    pub fn validate(&self) -> Result<()> {
        if self.brand_id.trim().is_empty() {
            return Err(anyhow!("Brand id is required"));
        }
        check_spreadsheet(&self.regional_manager_file, "Regional manager file")?;
        check_spreadsheet(&self.sales_data_file, "Sales data file")?;
        Ok(())
    }
}

fn check_spreadsheet(path: &Path, label: &str) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        return Err(anyhow!(
            "{} must be an .xlsx or .xls file: {}",
            label,
            path.display()
        ));
    }
    if !path.is_file() {
        return Err(anyhow!("{} not found: {}", label, path.display()));
    }
    Ok(())
}
