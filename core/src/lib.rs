pub mod config;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::Settings;
pub use model::brand::Brand;
pub use model::sales::{AggregateRecord, CellValue, MetricField, SalesRecord, GRAND_TOTAL_LABEL};
pub use model::selection::{ManagerType, Selection, Timeframe, Week};
pub use model::sheet::{SheetEntry, SheetUpload};
pub use repository::{BrandRepository, HttpDashboardRepository, SheetRepository};
pub use service::aggregate::{classify_cell, compute_aggregate, format_field, CellClass};
pub use service::brand_service::BrandService;
pub use service::dto::SalesTable;
pub use service::sheet_service::{SheetService, SheetView};
