use crate::model::brand::{Brand, BrandUpdate, NewBrand};
use crate::model::selection::Selection;
use crate::model::sheet::{SheetEntry, SheetUpload};
use anyhow::Result;

pub trait BrandRepository {
    fn list_brands(&self) -> Result<Vec<Brand>>;
    fn create_brand(&self, brand: &NewBrand) -> Result<()>;
    fn update_brand(&self, id: &str, update: &BrandUpdate) -> Result<()>;
    fn delete_brand(&self, id: &str) -> Result<()>;
}

pub trait SheetRepository {
    /// Sheets matching a selection, newest first.
    fn find_sheets(&self, selection: &Selection) -> Result<Vec<SheetEntry>>;
    fn upload_sheets(&self, upload: &SheetUpload) -> Result<()>;
}
